//! Behavior of the merged shapes emitted by `merge_shapes!`: field
//! partitioning, optionality of exclusive fields, per-field union enums, and
//! the lossless `From` conversions.

use widen::merge_shapes;

merge_shapes! {
    /// A task in either lifecycle stage.
    #[merged]
    #[derive(Debug, Clone, PartialEq)]
    pub struct TaskState;

    #[shape]
    #[derive(Debug, Clone, PartialEq)]
    pub struct IdleState {
        pub status: String,
    }

    #[shape]
    #[derive(Debug, Clone, PartialEq)]
    pub struct ProcessingState {
        pub status: String,
        pub progress: u32,
    }
}

merge_shapes! {
    #[merged]
    #[derive(Debug, PartialEq)]
    struct Point3;

    #[shape]
    #[derive(Debug, PartialEq)]
    struct PointA {
        x: i64,
        y: i64,
    }

    #[shape]
    #[derive(Debug, PartialEq)]
    struct PointB {
        x: i64,
        y: i64,
    }
}

merge_shapes! {
    #[merged]
    #[derive(Debug, PartialEq, Default)]
    struct Contact;

    #[shape]
    struct Phone {
        number: String,
    }

    #[shape]
    struct Email {
        address: String,
        verified: bool,
    }
}

merge_shapes! {
    #[merged]
    #[derive(Debug, PartialEq)]
    struct Measurement;

    #[shape]
    struct RawSample {
        value: u64,
        label: String,
    }

    #[shape]
    struct ScaledSample {
        value: f64,
    }
}

merge_shapes! {
    #[merged]
    #[derive(Debug, PartialEq)]
    struct MeasurementRev;

    #[shape]
    struct ScaledSampleRev {
        value: f64,
    }

    #[shape]
    struct RawSampleRev {
        value: u64,
        label: String,
    }
}

merge_shapes! {
    #[merged]
    #[derive(Debug, PartialEq)]
    struct Ticket;

    #[shape]
    struct Draft {
        title: String,
        assignee: Option<String>,
    }

    #[shape]
    struct Filed {
        title: String,
        number: u32,
    }
}

merge_shapes! {
    const DEFAULT_NAME: &str = "unnamed";

    #[merged]
    #[derive(Debug, PartialEq)]
    struct Named;

    #[shape]
    struct Anonymous;

    #[shape]
    struct WithName {
        name: String,
    }
}

/// Move a task into the processing stage.
fn advance(task: &mut TaskState, step: u32) {
    task.status = "processing".to_owned();
    task.progress = Some(step);
}

#[test]
fn tasks_move_between_stages_without_losing_shape() {
    let mut task = TaskState::from(IdleState { status: "idle".to_owned() });
    assert_eq!(task.status, "idle");
    assert_eq!(task.progress, None);

    advance(&mut task, 10);
    pretty_assertions::assert_eq!(
        task,
        TaskState { status: "processing".to_owned(), progress: Some(10) }
    );
}

#[test]
fn either_shape_embeds_losslessly() {
    let processing = ProcessingState { status: "processing".to_owned(), progress: 40 };
    let task = TaskState::from(processing.clone());
    assert_eq!(task.status, processing.status);
    assert_eq!(task.progress, Some(processing.progress));

    let idle = IdleState { status: "idle".to_owned() };
    let task = TaskState::from(idle.clone());
    assert_eq!(task.status, idle.status);
    assert_eq!(task.progress, None);
}

#[test]
fn identical_shapes_merge_to_the_common_shape() {
    // Every field is required at the common type.
    let merged = Point3::from(PointA { x: 1, y: 2 });
    assert_eq!(merged, Point3 { x: 1, y: 2 });

    let merged = Point3::from(PointB { x: 3, y: 4 });
    assert_eq!(merged, Point3 { x: 3, y: 4 });
}

#[test]
fn disjoint_shapes_make_everything_optional() {
    let contact = Contact::from(Phone { number: "555-0100".to_owned() });
    assert_eq!(contact.number.as_deref(), Some("555-0100"));
    assert_eq!(contact.address, None);
    assert_eq!(contact.verified, None);

    let contact = Contact::from(Email { address: "bo@example.com".to_owned(), verified: true });
    assert_eq!(contact.number, None);
    assert_eq!(contact.address.as_deref(), Some("bo@example.com"));
    assert_eq!(contact.verified, Some(true));

    assert_eq!(Contact::default(), Contact { number: None, address: None, verified: None });
}

#[test]
fn conflicting_fields_remember_their_source_shape() {
    let raw = Measurement::from(RawSample { value: 12, label: "sensor-1".to_owned() });
    assert_eq!(raw.value, MeasurementValue::RawSample(12));
    assert_eq!(raw.label.as_deref(), Some("sensor-1"));

    let scaled = Measurement::from(ScaledSample { value: 0.5 });
    assert_eq!(scaled.value, MeasurementValue::ScaledSample(0.5));
    assert_eq!(scaled.label, None);

    let unit = match scaled.value {
        MeasurementValue::RawSample(_) => "counts",
        MeasurementValue::ScaledSample(_) => "ratio",
    };
    assert_eq!(unit, "ratio");
}

#[test]
fn merge_order_changes_only_field_order() {
    let forward = Measurement::from(RawSample { value: 3, label: "x".to_owned() });
    let reverse = MeasurementRev::from(RawSampleRev { value: 3, label: "x".to_owned() });

    assert_eq!(forward.value, MeasurementValue::RawSample(3));
    assert_eq!(reverse.value, MeasurementRevValue::RawSampleRev(3));
    assert_eq!(forward.label, reverse.label);

    let forward = Measurement::from(ScaledSample { value: 1.5 });
    let reverse = MeasurementRev::from(ScaledSampleRev { value: 1.5 });
    assert_eq!(forward.label, None);
    assert_eq!(reverse.label, None);
    assert_eq!(forward.value, MeasurementValue::ScaledSample(1.5));
    assert_eq!(reverse.value, MeasurementRevValue::ScaledSampleRev(1.5));
}

#[test]
fn optional_fields_are_not_doubly_wrapped() {
    let ticket = Ticket::from(Draft { title: "leak".to_owned(), assignee: None });
    assert_eq!(ticket.assignee, None);
    assert_eq!(ticket.number, None);

    let ticket =
        Ticket::from(Draft { title: "leak".to_owned(), assignee: Some("ada".to_owned()) });
    assert_eq!(ticket.assignee.as_deref(), Some("ada"));

    let ticket = Ticket::from(Filed { title: "leak".to_owned(), number: 7 });
    assert_eq!(ticket.assignee, None);
    assert_eq!(ticket.number, Some(7));
    assert_eq!(ticket.title, "leak");
}

#[test]
fn empty_shapes_merge_to_all_optional() {
    let named = Named::from(Anonymous);
    assert_eq!(named.name, None);

    let named = Named::from(WithName { name: DEFAULT_NAME.to_owned() });
    assert_eq!(named.name.as_deref(), Some("unnamed"));
}
