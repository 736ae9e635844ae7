//! Behavior of the unions emitted by `define_union!`: widened field access
//! before narrowing, discriminator and key introspection, and the generated
//! reference unions for fields whose variants disagree on a type.

use widen::{Discriminated, Tag, define_union};

define_union! {
    /// The lifecycle of one request.
    #[tag(status)]
    #[derive(Debug, Clone, PartialEq)]
    pub enum RequestState {
        Loading { progress: u32 },
        Success { data: String },
        Error { error: String },
    }
}

define_union! {
    #[tag(kind)]
    enum Packet {
        Ping { seq: u32 },
        Pong { seq: u32 },
        Data { seq: u64, payload: Vec<u8> },
    }
}

define_union! {
    #[tag(kind)]
    enum Form {
        Text { label: String, value: String },
        Check { label: String, checked: bool },
    }
}

define_union! {
    /// A user known to the backend.
    #[derive(Debug, Clone, PartialEq)]
    struct User {
        name: String,
        email: String,
    }

    #[tag(status)]
    #[derive(Debug, Clone, PartialEq)]
    enum AuthState {
        Unauthenticated,
        Authenticating { progress: u32 },
        Authenticated { user: User, token: String },
        Error { message: String },
    }
}

define_union! {
    #[tag(kind)]
    #[derive(Debug, PartialEq)]
    enum Job {
        Queued { priority: Option<u8> },
        Running { pid: u32 },
        OnHold { reason: String },
    }

    #[tag(kind)]
    #[derive(Debug, PartialEq)]
    enum Dead {}
}

#[test]
fn widened_accessors_answer_on_every_variant() {
    let state = RequestState::Loading { progress: 40 };
    assert_eq!(state.status(), RequestStateStatus::Loading);
    assert_eq!(state.progress(), Some(&40));
    assert_eq!(state.data(), None);
    assert_eq!(state.error(), None);
    assert_eq!(state.keys(), ["status", "progress"]);

    let state = RequestState::Success { data: "ok".to_owned() };
    assert_eq!(state.status(), RequestStateStatus::Success);
    assert_eq!(state.progress(), None);
    assert_eq!(state.data().map(String::as_str), Some("ok"));
    assert_eq!(state.keys(), ["status", "data"]);
}

#[test]
fn narrowing_recovers_full_types() {
    let state = RequestState::Error { error: "boom".to_owned() };
    match &state {
        RequestState::Loading { progress } => panic!("unexpected: {progress}"),
        RequestState::Success { data } => panic!("unexpected: {data}"),
        RequestState::Error { error } => assert_eq!(error, "boom"),
    }
}

#[test]
fn tags_enumerate_and_print() {
    assert_eq!(
        RequestStateStatus::VALUES,
        [RequestStateStatus::Loading, RequestStateStatus::Success, RequestStateStatus::Error]
    );
    assert_eq!(RequestStateStatus::Loading.as_str(), "loading");
    assert_eq!(RequestStateStatus::Error.to_string(), "error");
    assert_eq!(JobKind::OnHold.as_str(), "on_hold");
}

#[test]
fn discriminated_is_usable_generically() {
    fn tag_names<D: Discriminated>(value: &D) -> (&'static str, &'static str) {
        (D::DISCRIMINATOR, value.tag().as_str())
    }

    let state = RequestState::Loading { progress: 1 };
    assert_eq!(tag_names(&state), ("status", "loading"));
    assert_eq!(Discriminated::keys(&state), ["status", "progress"]);
    assert_eq!(<RequestStateStatus as Tag>::VALUES.len(), 3);
}

#[test]
fn conflicting_field_types_go_through_the_reference_union() {
    let ping = Packet::Ping { seq: 3 };
    let pong = Packet::Pong { seq: 4 };
    let data = Packet::Data { seq: 9, payload: vec![1, 2] };

    assert!(matches!(ping.seq(), Some(PacketSeqRef::Ping(&3))));
    assert!(matches!(pong.seq(), Some(PacketSeqRef::Pong(&4))));
    assert!(matches!(data.seq(), Some(PacketSeqRef::Data(&9))));

    let width = match data.seq() {
        Some(PacketSeqRef::Ping(_) | PacketSeqRef::Pong(_)) => 32,
        Some(PacketSeqRef::Data(_)) => 64,
        None => 0,
    };
    assert_eq!(width, 64);

    // The field the variants agree on stays a plain reference.
    assert_eq!(data.payload(), Some(&vec![1, 2]));
    assert_eq!(ping.payload(), None);
}

#[test]
fn agreeing_field_types_share_one_accessor() {
    let text = Form::Text { label: "name".into(), value: "alice".into() };
    let check = Form::Check { label: "admin".into(), checked: true };

    assert_eq!(text.label().map(String::as_str), Some("name"));
    assert_eq!(check.label().map(String::as_str), Some("admin"));
    assert_eq!(text.value().map(String::as_str), Some("alice"));
    assert_eq!(text.checked(), None);
    assert_eq!(check.value(), None);
    assert_eq!(check.checked(), Some(&true));
}

#[test]
fn optional_fields_widen_to_nested_options() {
    let queued = Job::Queued { priority: Some(2) };
    let unprioritized = Job::Queued { priority: None };
    let running = Job::Running { pid: 77 };
    let on_hold = Job::OnHold { reason: "audit".to_owned() };

    assert_eq!(queued.priority(), Some(&Some(2)));
    assert_eq!(unprioritized.priority(), Some(&None));
    assert_eq!(running.priority(), None);
    assert_eq!(running.pid(), Some(&77));
    assert_eq!(on_hold.reason().map(String::as_str), Some("audit"));
    assert_eq!(queued.reason(), None);
}

#[test]
fn unit_variants_report_only_the_discriminator() {
    let state = AuthState::Unauthenticated;
    assert_eq!(state.keys(), ["status"]);
    assert_eq!(state.keys().len(), 1);
}

#[test]
fn auth_flow_reads_widened_fields_then_narrows() {
    let handshake = AuthState::Authenticating { progress: 60 };
    assert_eq!(handshake.status(), AuthStateStatus::Authenticating);
    assert_eq!(handshake.progress(), Some(&60));
    assert_eq!(handshake.user(), None);

    let denied = AuthState::Error { message: "denied".to_owned() };
    assert_eq!(denied.status(), AuthStateStatus::Error);
    assert_eq!(denied.message().map(String::as_str), Some("denied"));

    let session = AuthState::Authenticated {
        user: User { name: "Ada".to_owned(), email: "ada@example.com".to_owned() },
        token: "tok-1".to_owned(),
    };

    assert_eq!(session.status(), AuthStateStatus::Authenticated);
    assert_eq!(session.progress(), None);
    assert_eq!(session.user().map(|user| user.name.as_str()), Some("Ada"));
    assert_eq!(session.token().map(String::as_str), Some("tok-1"));
    assert_eq!(session.message(), None);
    assert_eq!(session.keys(), ["status", "user", "token"]);

    let line = match &session {
        AuthState::Unauthenticated => "signed out".to_owned(),
        AuthState::Authenticating { progress } => format!("{progress}%"),
        AuthState::Authenticated { user, .. } => format!("hello {}", user.name),
        AuthState::Error { message } => format!("failed: {message}"),
    };
    pretty_assertions::assert_eq!(line, "hello Ada");
}

#[test]
fn unions_compose_with_common_fields() {
    struct Tracked {
        id: String,
        state: RequestState,
    }

    let tracked =
        Tracked { id: "req-1".to_owned(), state: RequestState::Loading { progress: 80 } };
    assert_eq!(tracked.id, "req-1");
    assert_eq!(tracked.state.progress(), Some(&80));
}

#[test]
fn unannotated_items_pass_through() {
    let user = User { name: "Bo".to_owned(), email: "bo@example.com".to_owned() };
    assert_eq!(user.clone(), user);
    assert_eq!(user.email, "bo@example.com");
}

#[test]
fn empty_unions_are_well_formed() {
    fn assert_discriminated<D: Discriminated>() {}

    assert!(DeadKind::VALUES.is_empty());
    assert_eq!(<Dead as Discriminated>::DISCRIMINATOR, "kind");
    assert_discriminated::<Dead>();
}
