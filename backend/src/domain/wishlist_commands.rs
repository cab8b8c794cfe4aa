//! Wishlist command interpreter.
//!
//! Implements the driving port [`WishlistCommand`]: one inbound message is
//! parsed, run against the store and the item resolver, and rendered into at
//! most one reply. Usage problems, unknown codes and lookup failures become
//! reply lines; store failures propagate as [`Error`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    ItemResolver, ResolvedItem, WishlistCommand, WishlistRepository, WishlistRepositoryError,
};
use crate::domain::replies;
use crate::domain::{
    CommandAction, Error, InboundMessage, ItemCode, NewWishlistEntry, RequesterId,
    parse_codes, parse_command, split_name_and_codes,
};

/// Who an add is performed for.
enum Enrolment<'a> {
    /// The authenticated sender.
    Sender(&'a InboundMessage),
    /// A named person entered by the admin.
    Named(&'a str),
}

impl Enrolment<'_> {
    fn requester(&self) -> RequesterId {
        match self {
            Self::Sender(message) => message.sender().clone(),
            Self::Named(name) => RequesterId::manual(name),
        }
    }

    fn display_name(&self) -> &str {
        match self {
            Self::Sender(message) => message.display_name(),
            Self::Named(name) => *name,
        }
    }

    fn lookup_failed(&self, code: &ItemCode) -> String {
        match self {
            Self::Sender(_) => replies::add_lookup_failed(code),
            Self::Named(_) => replies::admin_add_lookup_failed(code),
        }
    }

    fn not_found(&self, code: &ItemCode) -> String {
        match self {
            Self::Sender(_) => replies::add_not_found(code),
            Self::Named(_) => replies::admin_add_not_found(code),
        }
    }

    fn queued(&self, item: &ResolvedItem, position: u64) -> String {
        match self {
            Self::Sender(_) => replies::add_queued(&item.name, &item.code, position),
            Self::Named(name) => replies::admin_add_queued(name, &item.name, &item.code, position),
        }
    }
}

/// Command interpreter driving the wishlist store and item resolver.
#[derive(Clone)]
pub struct WishlistCommandService<R, I> {
    repository: Arc<R>,
    resolver: Arc<I>,
    admin: Option<RequesterId>,
}

impl<R, I> WishlistCommandService<R, I> {
    /// Create a service. Without an `admin` identity every admin command is
    /// refused.
    pub fn new(repository: Arc<R>, resolver: Arc<I>, admin: Option<RequesterId>) -> Self {
        Self {
            repository,
            resolver,
            admin,
        }
    }

    fn is_admin(&self, sender: &RequesterId) -> bool {
        self.admin.as_ref() == Some(sender)
    }
}

impl<R, I> WishlistCommandService<R, I>
where
    R: WishlistRepository,
    I: ItemResolver,
{
    fn map_repository_error(error: WishlistRepositoryError) -> Error {
        match error {
            WishlistRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("wishlist store unavailable: {message}"))
            }
            WishlistRepositoryError::Query { message } => {
                Error::internal(format!("wishlist store error: {message}"))
            }
        }
    }

    async fn enrol(&self, who: &Enrolment<'_>, codes: &[ItemCode]) -> Result<String, Error> {
        let mut lines = Vec::with_capacity(codes.len());
        for code in codes {
            let item = match self.resolver.resolve(code).await {
                Ok(Some(item)) => item,
                Ok(None) => {
                    lines.push(who.not_found(code));
                    continue;
                }
                Err(error) => {
                    warn!(code = %code, %error, "item lookup failed");
                    lines.push(who.lookup_failed(code));
                    continue;
                }
            };

            let entry = NewWishlistEntry {
                requester: who.requester(),
                display_name: who.display_name().to_owned(),
                code: item.code.clone(),
                item_name: item.name.clone(),
            };
            let outcome = self
                .repository
                .insert(&entry)
                .await
                .map_err(Self::map_repository_error)?;
            info!(
                code = %item.code,
                position = outcome.position,
                inserted = outcome.inserted,
                "wishlist entry queued"
            );
            lines.push(who.queued(&item, outcome.position));
        }
        Ok(lines.join("\n"))
    }

    async fn add(&self, message: &InboundMessage, args: &str) -> Result<String, Error> {
        if args.is_empty() {
            return Ok(replies::ADD_USAGE.to_owned());
        }
        let codes = parse_codes(args);
        if codes.is_empty() {
            return Ok(replies::ADD_INVALID.to_owned());
        }
        self.enrol(&Enrolment::Sender(message), &codes).await
    }

    async fn admin_add(&self, args: &str) -> Result<String, Error> {
        if args.is_empty() {
            return Ok(replies::ADMIN_ADD_USAGE.to_owned());
        }
        let parsed = split_name_and_codes(args);
        if parsed.name.is_empty() {
            return Ok(replies::ADMIN_ADD_MISSING_NAME.to_owned());
        }
        if parsed.codes.is_empty() {
            return Ok(replies::ADMIN_ADD_NO_CODES.to_owned());
        }
        self.enrol(&Enrolment::Named(&parsed.name), &parsed.codes)
            .await
    }

    async fn remove(&self, message: &InboundMessage, args: &str) -> Result<String, Error> {
        if args.is_empty() {
            return Ok(replies::REMOVE_USAGE.to_owned());
        }
        let Some(code) = parse_codes(args).into_iter().next() else {
            return Ok(replies::REMOVE_INVALID.to_owned());
        };
        let removed = self
            .repository
            .remove_by_identity(message.sender(), &code)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(match removed {
            Some(item_name) => {
                info!(code = %code, "wishlist entry removed");
                replies::removed(&item_name)
            }
            None => replies::not_queued(&code),
        })
    }

    async fn admin_remove(&self, args: &str) -> Result<String, Error> {
        if args.is_empty() {
            return Ok(replies::ADMIN_REMOVE_USAGE.to_owned());
        }
        let parsed = split_name_and_codes(args);
        if parsed.name.is_empty() {
            return Ok(replies::ADMIN_REMOVE_MISSING_NAME.to_owned());
        }
        let Some(code) = parsed.codes.first() else {
            return Ok(replies::ADMIN_REMOVE_NO_CODES.to_owned());
        };
        let removed = self
            .repository
            .remove_earliest_by_name(code, &parsed.name)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(match removed {
            Some(item_name) => {
                info!(code = %code, "admin removed wishlist entry");
                replies::admin_removed(&parsed.name, &item_name, code)
            }
            None => replies::admin_not_queued(&parsed.name, code),
        })
    }

    async fn view(&self, message: &InboundMessage) -> Result<String, Error> {
        let items = self
            .repository
            .list_for_identity(message.sender())
            .await
            .map_err(Self::map_repository_error)?;
        Ok(replies::view(&items))
    }

    async fn count(&self, args: &str) -> Result<String, Error> {
        if args.is_empty() {
            return Ok(replies::COUNT_USAGE.to_owned());
        }
        let Some(code) = parse_codes(args).into_iter().next() else {
            return Ok(replies::COUNT_INVALID.to_owned());
        };
        let total = self
            .repository
            .count_for_code(&code)
            .await
            .map_err(Self::map_repository_error)?;
        let label = match self.resolver.resolve(&code).await {
            Ok(Some(item)) => replies::item_label(&item.code, Some(&item.name)),
            Ok(None) => replies::item_label(&code, None),
            Err(error) => {
                warn!(code = %code, %error, "item lookup failed; labelling with bare code");
                replies::item_label(&code, None)
            }
        };
        Ok(replies::count(&label, total))
    }

    async fn admin_list(&self, args: &str) -> Result<String, Error> {
        if args.is_empty() {
            return Ok(replies::ADMIN_LIST_USAGE.to_owned());
        }
        let Some(code) = parse_codes(args).into_iter().next() else {
            return Ok(replies::ADMIN_LIST_INVALID.to_owned());
        };
        let entries = self
            .repository
            .list_for_code(&code)
            .await
            .map_err(Self::map_repository_error)?;
        let Some(first) = entries.first() else {
            return Ok(replies::admin_list_empty(&code));
        };
        let label = replies::item_label(&code, Some(&first.item_name));
        let names: Vec<String> = entries.iter().map(|entry| entry.listing_name()).collect();
        Ok(replies::admin_list(&label, names.iter().map(String::as_str)))
    }
}

#[async_trait]
impl<R, I> WishlistCommand for WishlistCommandService<R, I>
where
    R: WishlistRepository,
    I: ItemResolver,
{
    async fn handle(&self, message: &InboundMessage) -> Result<Option<String>, Error> {
        let Some(command) = parse_command(message.text()) else {
            return Ok(None);
        };
        if command.action.requires_admin() && !self.is_admin(message.sender()) {
            return Ok(Some(replies::PERMISSION_DENIED.to_owned()));
        }

        let reply = match command.action {
            CommandAction::Add => self.add(message, command.args).await?,
            CommandAction::Remove => self.remove(message, command.args).await?,
            CommandAction::View => self.view(message).await?,
            CommandAction::Count => self.count(command.args).await?,
            CommandAction::AdminAdd => self.admin_add(command.args).await?,
            CommandAction::AdminRemove => self.admin_remove(command.args).await?,
            CommandAction::AdminList => self.admin_list(command.args).await?,
        };
        Ok(Some(reply))
    }
}

#[cfg(test)]
#[path = "wishlist_commands_tests.rs"]
mod tests;
