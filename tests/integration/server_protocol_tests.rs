/*!
 * Integration tests for the JSON line request protocol
 */

use anyhow::Result;
use serde_json::{json, Value};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use scriptorium::app_controller::Controller;
use scriptorium::server::{Server, GLOSSARY_LIST_URI, STATS_URI};
use crate::common;

fn channel() -> (UnboundedSender<Value>, UnboundedReceiver<Value>) {
    mpsc::unbounded_channel()
}

fn drain(receiver: &mut UnboundedReceiver<Value>) -> Vec<Value> {
    let mut messages = Vec::new();
    while let Ok(message) = receiver.try_recv() {
        messages.push(message);
    }
    messages
}

fn tool_call(id: u64, name: &str, arguments: Value) -> String {
    json!({
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
    .to_string()
}

fn first_text(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_toolsList_shouldExposeFourTools() {
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(r#"{"id": 1, "method": "tools/list"}"#, &sender)
        .await
        .unwrap();

    let names: Vec<&str> = response["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|tool| tool["name"].as_str())
        .collect();
    assert_eq!(names, vec!["load_glossary", "translate_text", "search_terminology", "extract_text"]);
}

#[tokio::test]
async fn test_unknownMethod_shouldBeHardError() {
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(r#"{"id": 7, "method": "prompts/list"}"#, &sender)
        .await
        .unwrap();

    assert_eq!(response["id"], 7);
    assert_eq!(response["error"]["code"], -32601);
    assert!(response.get("result").is_none());
}

#[tokio::test]
async fn test_unknownTool_shouldBeHardError() {
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(&tool_call(2, "translate_everything", json!({})), &sender)
        .await
        .unwrap();

    assert!(response["error"]["message"].as_str().unwrap().contains("translate_everything"));
}

#[tokio::test]
async fn test_malformedJson_shouldReturnParseError() {
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server.handle_line("{ nope", &sender).await.unwrap();

    assert_eq!(response["error"]["code"], -32700);
    assert_eq!(response["id"], Value::Null);
}

#[tokio::test]
async fn test_clientNotification_shouldGetNoResponse() {
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(r#"{"method": "notifications/initialized"}"#, &sender)
        .await;

    assert!(response.is_none());
}

#[tokio::test]
async fn test_loadGlossary_unsupportedFile_shouldBeSoftError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "terms.xyz", "thee: you")?;
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(&tool_call(3, "load_glossary", json!({ "filePath": path })), &sender)
        .await
        .unwrap();

    assert!(response.get("error").is_none());
    assert_eq!(response["result"]["isError"], true);
    assert!(first_text(&response).contains("Unsupported file format"));
    Ok(())
}

#[tokio::test]
async fn test_loadGlossary_textFile_shouldReportCount() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_sample_glossary(temp_dir.path(), "early.txt")?;
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(
            &tool_call(4, "load_glossary", json!({ "filePath": path, "glossaryName": "early" })),
            &sender,
        )
        .await
        .unwrap();

    assert_eq!(response["result"]["isError"], false);
    assert!(first_text(&response).contains("3 entries"));
    assert!(first_text(&response).contains("'early'"));
    Ok(())
}

#[tokio::test]
async fn test_translateText_withProgressToken_shouldNotifyBeforeResponse() {
    let server = Server::new(Controller::new_for_test());
    server.controller().load_glossary_text("g1", "LORD: Señor");
    let (sender, mut receiver) = channel();

    let line = json!({
        "id": 5,
        "method": "tools/call",
        "params": {
            "name": "translate_text",
            "arguments": { "text": "The LORD is my shepherd", "useGlossaries": ["g1"] },
            "_meta": { "progressToken": "tok-1" }
        }
    })
    .to_string();
    let response = server.handle_line(&line, &sender).await.unwrap();

    let notifications = drain(&mut receiver);
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n["method"] == "notifications/progress"));
    assert!(notifications.iter().all(|n| n["params"]["progressToken"] == "tok-1"));
    assert_eq!(notifications[1]["params"]["progress"], 100);

    let result: Value = serde_json::from_str(first_text(&response)).unwrap();
    assert_eq!(result["translatedText"], "The LORD is my shepherd");
    assert_eq!(result["confidence"], "low");
    assert_eq!(result["terminology"][0]["term"], "LORD");
    assert_eq!(result["terminology"][0]["source"], "g1");
}

#[tokio::test]
async fn test_translateText_withoutGlossaries_shouldSendNoProgress() {
    let server = Server::new(Controller::new_for_test());
    let (sender, mut receiver) = channel();

    let line = json!({
        "id": 6,
        "method": "tools/call",
        "params": {
            "name": "translate_text",
            "arguments": { "text": "anything" },
            "_meta": { "progressToken": 9 }
        }
    })
    .to_string();
    let response = server.handle_line(&line, &sender).await.unwrap();

    assert!(drain(&mut receiver).is_empty());
    assert_eq!(response["result"]["isError"], false);
}

#[tokio::test]
async fn test_translateText_missingText_shouldBeInvalidParams() {
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(&tool_call(8, "translate_text", json!({ "context": "legal" })), &sender)
        .await
        .unwrap();

    assert_eq!(response["error"]["code"], -32602);
}

#[tokio::test]
async fn test_searchTerminology_shouldReturnJsonMatches() {
    let server = Server::new(Controller::new_for_test());
    server.controller().load_glossary_text("early", common::SAMPLE_GLOSSARY);
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(&tool_call(9, "search_terminology", json!({ "term": "you" })), &sender)
        .await
        .unwrap();

    let matches: Value = serde_json::from_str(first_text(&response)).unwrap();
    assert_eq!(matches.as_array().unwrap().len(), 2);
    assert_eq!(matches[0]["source"], "early");
}

#[tokio::test]
async fn test_readResources_shouldReflectCurrentState() {
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();
    server.controller().load_glossary_text("early", common::SAMPLE_GLOSSARY);
    server
        .handle_line(&tool_call(10, "translate_text", json!({ "text": "thee" })), &sender)
        .await;

    let glossaries = server
        .handle_line(
            &json!({ "id": 11, "method": "resources/read", "params": { "uri": GLOSSARY_LIST_URI } }).to_string(),
            &sender,
        )
        .await
        .unwrap();
    let stats = server
        .handle_line(
            &json!({ "id": 12, "method": "resources/read", "params": { "uri": STATS_URI } }).to_string(),
            &sender,
        )
        .await
        .unwrap();

    let glossaries: Value =
        serde_json::from_str(glossaries["result"]["contents"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(glossaries["glossaries"][0]["name"], "early");
    assert_eq!(glossaries["glossaries"][0]["entryCount"], 3);

    let stats: Value = serde_json::from_str(stats["result"]["contents"][0]["text"].as_str().unwrap()).unwrap();
    assert_eq!(stats["totalTranslations"], 1);
    assert_eq!(stats["glossariesLoaded"], 1);
}

#[tokio::test]
async fn test_readResource_unknownUri_shouldBeHardError() {
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(r#"{"id": 13, "method": "resources/read", "params": {"uri": "glossary://nope"}}"#, &sender)
        .await
        .unwrap();

    assert!(response["error"]["message"].as_str().unwrap().contains("glossary://nope"));
}

#[tokio::test]
async fn test_serve_invalidUtf8Line_shouldAnswerAndKeepServing() -> Result<()> {
    let server = Server::new(Controller::new_for_test());
    let (sender, mut receiver) = channel();
    let input: &[u8] = b"\xff\xfe garbage\n\n{\"id\": 1, \"method\": \"tools/list\"}\n";

    server.serve(input, &sender).await?;

    let responses = drain(&mut receiver);
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[0]["id"], Value::Null);
    assert_eq!(responses[1]["id"], 1);
    assert!(responses[1]["result"]["tools"].is_array());
    Ok(())
}

#[tokio::test]
async fn test_serve_lastLineWithoutNewline_shouldBeAnswered() -> Result<()> {
    let server = Server::new(Controller::new_for_test());
    let (sender, mut receiver) = channel();
    let input: &[u8] = b"{\"id\": 2, \"method\": \"resources/list\"}";

    server.serve(input, &sender).await?;

    let responses = drain(&mut receiver);
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["result"]["resources"][0]["uri"], GLOSSARY_LIST_URI);
    Ok(())
}

#[tokio::test]
async fn test_nullId_shouldStillGetResponse() {
    let server = Server::new(Controller::new_for_test());
    let (sender, _receiver) = channel();

    let response = server
        .handle_line(r#"{"id": null, "method": "tools/list"}"#, &sender)
        .await
        .unwrap();

    assert_eq!(response["id"], Value::Null);
    assert!(response["result"]["tools"].is_array());
}
