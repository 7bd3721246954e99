use nodeboard_core::config::Config;
use nodeboard_core::stdio::run_session;
use nodeboard_core::InteractionController;
use serde_json::Value;

async fn drive(input: &str) -> anyhow::Result<(InteractionController, Vec<Value>)> {
    let mut controller = InteractionController::new();
    let mut output = Vec::new();
    run_session(&mut controller, input.as_bytes(), &mut output, &Config::default()).await?;

    let responses = String::from_utf8(output)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<Vec<Value>, _>>()?;
    Ok((controller, responses))
}

#[tokio::test]
async fn session_applies_requests_in_order() -> anyhow::Result<()> {
    let input = r#"
{"id":1,"method":"add_node","params":{"label":"A"}}
{"id":2,"method":"add_node","params":{"label":"B"}}
{"id":3,"method":"connect","params":{"source":"1","target":"2"}}
{"id":4,"method":"edge_hover_enter","params":{"edge":"e1-2"}}
{"id":5,"method":"node_hover_enter","params":{"node":"1"}}
{"id":6,"method":"node_delete","params":{"node":"1"}}
{"id":7,"method":"snapshot"}
"#;
    let (controller, responses) = drive(input).await?;
    assert_eq!(responses.len(), 7);

    assert_eq!(responses[0]["result"]["effect"]["kind"], "node_added");
    assert_eq!(responses[0]["result"]["effect"]["node"], "1");
    assert_eq!(responses[2]["result"]["effect"]["edge"], "e1-2");
    assert_eq!(
        responses[3]["result"]["snapshot"]["edges"][0]["hover_label"],
        "X"
    );

    let last = &responses[6]["result"]["snapshot"];
    assert_eq!(last["nodes"].as_array().map(Vec::len), Some(1));
    assert_eq!(last["nodes"][0]["id"], "2");
    assert_eq!(last["edges"].as_array().map(Vec::len), Some(0));
    assert_eq!(controller.store().node_count(), 1);
    Ok(())
}

#[tokio::test]
async fn bad_lines_get_errors_and_session_continues() -> anyhow::Result<()> {
    let input = "garbage\n{\"id\":\"x\",\"method\":\"fly\"}\n{\"id\":3,\"method\":\"add_node\",\"params\":{\"label\":\"ok\"}}\n";
    let (controller, responses) = drive(input).await?;

    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], "x");
    assert_eq!(responses[1]["error"]["code"], -32601);
    assert_eq!(responses[2]["result"]["effect"]["node"], "1");
    assert_eq!(controller.store().node_count(), 1);
    Ok(())
}

#[tokio::test]
async fn view_reports_overlays() -> anyhow::Result<()> {
    let input = r#"{"method":"add_node","params":{"label":"A"}}
{"method":"node_click","params":{"node":"1"}}
{"method":"edit_input","params":{"node":"1","text":"A!"}}
{"method":"view"}
{"method":"save_edit","params":{"node":"1"}}
"#;
    let (controller, responses) = drive(input).await?;

    let node = &responses[3]["result"]["view"]["nodes"][0];
    assert_eq!(node["visual"]["kind"], "editing");
    assert_eq!(node["edit_overlay"]["draft"], "A!");
    assert_eq!(node["delete_control"], false);
    assert_eq!(controller.store().nodes()[0].label, "A!");
    Ok(())
}

#[tokio::test]
async fn undecodable_line_is_reported_and_session_continues() -> anyhow::Result<()> {
    let mut input = b"{\"id\":1,\"method\":\"add_node\",\"params\":{\"label\":\"A\"}}\n".to_vec();
    input.extend_from_slice(b"\xff\xfe garbage\n");
    input.extend_from_slice(b"{\"id\":3,\"method\":\"add_node\",\"params\":{\"label\":\"B\"}}\n");

    let mut controller = InteractionController::new();
    let mut output = Vec::new();
    let stats = run_session(&mut controller, &input[..], &mut output, &Config::default()).await?;

    let responses = String::from_utf8(output)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<Vec<Value>, _>>()?;
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[1]["error"]["code"], -32700);
    assert_eq!(responses[2]["result"]["effect"]["node"], "2");
    assert_eq!(controller.store().node_count(), 2);
    assert_eq!((stats.requests, stats.errors), (3, 1));
    Ok(())
}

#[tokio::test]
async fn pretty_config_keeps_one_line_per_response() -> anyhow::Result<()> {
    let input = "{\"id\":1,\"method\":\"add_node\",\"params\":{\"label\":\"A\"}}\n{\"id\":2,\"method\":\"view\"}\n";
    let config = Config {
        pretty: true,
        ..Config::default()
    };

    let mut controller = InteractionController::new();
    let mut output = Vec::new();
    run_session(&mut controller, input.as_bytes(), &mut output, &config).await?;

    let text = String::from_utf8(output)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: Value = serde_json::from_str(line)?;
        assert!(value.get("result").is_some());
    }
    Ok(())
}
