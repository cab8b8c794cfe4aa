//! Behaviour tests for the wishlist command interpreter.
//!
//! Messages flow through the public driving port exactly as a transport
//! adapter would deliver them. The store is in memory and the catalogue is a
//! fixed in-process stub, so these scenarios need no external services.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;
use wishlist_backend::domain::ports::{
    ItemResolver, ItemResolverError, ResolvedItem, WishlistCommand,
};
use wishlist_backend::domain::{InboundMessage, ItemCode, RequesterId, WishlistCommandService};
use wishlist_backend::outbound::memory::InMemoryWishlistRepository;

const ADMIN_ID: &str = "Uadmin000000";

// -----------------------------------------------------------------------------
// Test World
// -----------------------------------------------------------------------------

/// Catalogue stub; codes listed in `offline` fail as if the site were down.
struct StubCatalogue {
    names: HashMap<&'static str, &'static str>,
    offline: Vec<&'static str>,
}

impl StubCatalogue {
    fn new() -> Self {
        Self {
            names: HashMap::from([
                ("BARL2BR", "Bartholomew Bear"),
                ("C3CW", "Amuseable Cloud"),
                ("OT6SDP", "Otto Sausage Dog"),
            ]),
            offline: vec!["DOWN1"],
        }
    }
}

#[async_trait]
impl ItemResolver for StubCatalogue {
    async fn resolve(&self, code: &ItemCode) -> Result<Option<ResolvedItem>, ItemResolverError> {
        if self.offline.contains(&code.as_str()) {
            return Err(ItemResolverError::timeout("stub catalogue offline"));
        }
        Ok(self.names.get(code.as_str()).map(|name| ResolvedItem {
            code: code.clone(),
            name: (*name).to_owned(),
            url: format!("https://catalogue.test/{code}"),
        }))
    }
}

type Service = WishlistCommandService<InMemoryWishlistRepository, StubCatalogue>;

struct WishlistWorld {
    runtime: Runtime,
    service: Service,
    last_reply: RefCell<Option<Option<String>>>,
}

impl WishlistWorld {
    fn new() -> Self {
        let admin = RequesterId::new(ADMIN_ID).expect("valid admin id");
        Self {
            runtime: Runtime::new().expect("tokio runtime should initialize"),
            service: WishlistCommandService::new(
                Arc::new(InMemoryWishlistRepository::new()),
                Arc::new(StubCatalogue::new()),
                Some(admin),
            ),
            last_reply: RefCell::new(None),
        }
    }

    /// Scenario names map to fixed identities; `Boss` is the admin.
    fn identity(name: &str) -> RequesterId {
        let raw = match name {
            "Boss" => ADMIN_ID.to_owned(),
            other => format!("U-{other}"),
        };
        RequesterId::new(raw).expect("valid id")
    }

    fn send(&self, name: &str, text: &str) {
        let message = InboundMessage::new(Self::identity(name), Some(name.to_owned()), text);
        let reply = self
            .runtime
            .block_on(self.service.handle(&message))
            .expect("command should not fail");
        *self.last_reply.borrow_mut() = Some(reply);
    }

    fn reply(&self) -> String {
        self.last_reply
            .borrow()
            .clone()
            .expect("a message should have been sent")
            .expect("the handler should have replied")
    }
}

fn unquote(raw: &str) -> &str {
    raw.trim().trim_matches('"')
}

#[fixture]
fn world() -> WishlistWorld {
    WishlistWorld::new()
}

// -----------------------------------------------------------------------------
// Steps
// -----------------------------------------------------------------------------

#[given("a wishlist handler with an in-memory store")]
fn a_wishlist_handler(world: &WishlistWorld) {
    assert!(world.last_reply.borrow().is_none());
}

#[when("{name} sends {text}")]
fn someone_sends(world: &WishlistWorld, name: String, text: String) {
    world.send(name.trim(), unquote(&text));
}

#[then("the reply is {expected}")]
fn the_reply_is(world: &WishlistWorld, expected: String) {
    assert_eq!(world.reply(), unquote(&expected));
}

#[then("reply line {line} is {expected}")]
fn reply_line_is(world: &WishlistWorld, line: usize, expected: String) {
    let reply = world.reply();
    let actual = reply
        .lines()
        .nth(line - 1)
        .unwrap_or_else(|| panic!("reply has no line {line}: {reply:?}"));
    assert_eq!(actual, unquote(&expected));
}

#[then("there is no reply")]
fn there_is_no_reply(world: &WishlistWorld) {
    let last = world.last_reply.borrow().clone();
    assert_eq!(last, Some(None), "expected silence, got {last:?}");
}

// -----------------------------------------------------------------------------
// Scenario Bindings
// -----------------------------------------------------------------------------

#[scenario(
    path = "tests/features/wishlist_commands.feature",
    name = "Positions renumber after a self-remove"
)]
fn positions_renumber_after_a_self_remove(world: WishlistWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wishlist_commands.feature",
    name = "Counting an empty queue invites the sender to be first"
)]
fn counting_an_empty_queue_invites_the_sender_to_be_first(world: WishlistWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wishlist_commands.feature",
    name = "Admin add followed by admin remove leaves the queue unchanged"
)]
fn admin_add_followed_by_admin_remove_leaves_the_queue_unchanged(world: WishlistWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wishlist_commands.feature",
    name = "Each code in one message is handled independently"
)]
fn each_code_in_one_message_is_handled_independently(world: WishlistWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wishlist_commands.feature",
    name = "Adding twice reports the existing position"
)]
fn adding_twice_reports_the_existing_position(world: WishlistWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wishlist_commands.feature",
    name = "The admin lists a queue in arrival order"
)]
fn the_admin_lists_a_queue_in_arrival_order(world: WishlistWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wishlist_commands.feature",
    name = "Admin commands are refused for other users"
)]
fn admin_commands_are_refused_for_other_users(world: WishlistWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/wishlist_commands.feature",
    name = "Ordinary chatter gets no reply"
)]
fn ordinary_chatter_gets_no_reply(world: WishlistWorld) {
    let _ = world;
}
