use nodeboard_core::layout::LayoutHint;
use nodeboard_core::{
    Effect, EdgeId, HostCommand, InteractionController, NodeId, Position, RenderState,
    SurfaceEvent,
};

fn add(ctl: &mut InteractionController, label: &str) -> NodeId {
    match ctl.handle_command(HostCommand::AddNode {
        label: label.to_string(),
    }) {
        Effect::NodeAdded { node } => node,
        other => panic!("expected NodeAdded, got {:?}", other),
    }
}

fn connect(ctl: &mut InteractionController, source: &str, target: &str) -> EdgeId {
    match ctl.handle_event(SurfaceEvent::Connect {
        source: source.into(),
        target: target.into(),
        id: None,
    }) {
        Effect::EdgeAdded { edge } => edge,
        other => panic!("expected EdgeAdded, got {:?}", other),
    }
}

#[test]
fn two_nodes_one_edge_then_cascade() {
    let mut ctl = InteractionController::new();

    let a = add(&mut ctl, "A");
    let b = add(&mut ctl, "B");
    assert_eq!(a.as_str(), "1");
    assert_eq!(b.as_str(), "2");
    assert_eq!(ctl.store().node(&a).unwrap().position, Position::new(400.0, 400.0));
    assert_eq!(ctl.store().node(&b).unwrap().position, Position::new(410.0, 410.0));

    let e1 = connect(&mut ctl, "1", "2");
    let edge = ctl.store().edge(&e1).unwrap();
    assert_eq!((edge.source.as_str(), edge.target.as_str()), ("1", "2"));
    assert_eq!(edge.hover_label, None);

    ctl.handle_event(SurfaceEvent::EdgeHoverEnter { edge: e1.clone() });
    assert_eq!(ctl.store().edge(&e1).unwrap().hover_label.as_deref(), Some("X"));

    ctl.handle_event(SurfaceEvent::EdgeHoverLeave { edge: e1.clone() });
    assert_eq!(ctl.store().edge(&e1).unwrap().hover_label, None);

    ctl.handle_event(SurfaceEvent::NodeHoverEnter { node: a.clone() });
    ctl.handle_event(SurfaceEvent::NodeDeleteControl { node: a.clone() });

    let snap = ctl.snapshot();
    assert!(snap.node(&a).is_none());
    assert!(snap.edge(&e1).is_none());
    assert_eq!(snap.nodes.len(), 1);
    assert_eq!(snap.nodes[0].id, b);
}

#[test]
fn ids_are_one_through_n() {
    for n in [0usize, 1, 7, 23] {
        let mut ctl = InteractionController::new();
        let ids: Vec<String> = (0..n)
            .map(|i| add(&mut ctl, &format!("n{}", i)).to_string())
            .collect();
        let expected: Vec<String> = (1..=n).map(|i| i.to_string()).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn cascade_touches_only_incident_edges() {
    let mut ctl = InteractionController::new();
    for label in ["A", "B", "C", "D"] {
        add(&mut ctl, label);
    }
    connect(&mut ctl, "1", "2");
    connect(&mut ctl, "2", "3");
    connect(&mut ctl, "4", "2");
    connect(&mut ctl, "3", "4");
    connect(&mut ctl, "2", "2");

    ctl.handle_event(SurfaceEvent::NodeHoverEnter { node: "2".into() });
    ctl.handle_event(SurfaceEvent::NodeDeleteControl { node: "2".into() });

    let remaining: Vec<_> = ctl
        .snapshot()
        .edges
        .iter()
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(remaining, ["e3-4"]);

    let revision = ctl.store().revision();
    ctl.handle_event(SurfaceEvent::NodeHoverEnter { node: "2".into() });
    ctl.handle_event(SurfaceEvent::NodeDeleteControl { node: "2".into() });
    assert_eq!(ctl.store().revision(), revision);
}

#[test]
fn edit_flow_commits_label() {
    let mut ctl = InteractionController::new();
    let id = add(&mut ctl, "draft");

    ctl.handle_event(SurfaceEvent::NodeClick { node: id.clone() });
    assert_eq!(ctl.store().node(&id).unwrap().render_state, RenderState::Editing);

    ctl.handle_command(HostCommand::EditCommit {
        node: id.clone(),
        text: "new text".into(),
    });
    let node = ctl.store().node(&id).unwrap();
    assert_eq!(node.label, "new text");
    assert_eq!(node.render_state, RenderState::Normal);
}

#[test]
fn positions_repeat_every_ten_adds() {
    let mut ctl = InteractionController::new();
    let ids: Vec<NodeId> = (0..22).map(|i| add(&mut ctl, &i.to_string())).collect();
    let snap = ctl.snapshot();

    for k in 0..12 {
        let a = snap.node(&ids[k]).unwrap().position;
        let b = snap.node(&ids[k + 10]).unwrap().position;
        assert_eq!(a, b);
        assert_eq!(a, LayoutHint::position_for(k as u64));
    }
}

#[test]
fn stale_ids_never_error() {
    let mut ctl = InteractionController::new();
    let events = [
        SurfaceEvent::NodeHoverEnter { node: "9".into() },
        SurfaceEvent::NodeHoverLeave { node: "9".into() },
        SurfaceEvent::NodeClick { node: "9".into() },
        SurfaceEvent::NodeDeleteControl { node: "9".into() },
        SurfaceEvent::EdgeHoverEnter { edge: "e9-9".into() },
        SurfaceEvent::EdgeHoverLeave { edge: "e9-9".into() },
        SurfaceEvent::EdgeClick { edge: "e9-9".into() },
    ];
    for event in events {
        assert_eq!(ctl.handle_event(event), Effect::Unchanged);
    }
    assert_eq!(
        ctl.handle_command(HostCommand::EditCommit {
            node: "9".into(),
            text: "x".into()
        }),
        Effect::Unchanged
    );
    assert_eq!(ctl.store().revision(), 0);
}
