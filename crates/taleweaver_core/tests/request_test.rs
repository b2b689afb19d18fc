use taleweaver_core::{
    GenerateRequest, GenerateResponse, Input, Message, Output, Role, TokenUsageData,
    init_observability, shutdown_observability,
};

#[test]
fn test_prompt_request_holds_single_user_message() {
    let request = GenerateRequest::prompt("a lonely lighthouse keeper");

    assert_eq!(request.messages().len(), 1);
    let message = &request.messages()[0];
    assert_eq!(*message.role(), Role::User);
    assert_eq!(
        message.content(),
        &vec![Input::Text("a lonely lighthouse keeper".to_string())]
    );
    assert!(request.max_tokens().is_none());
    assert!(request.temperature().is_none());
}

#[test]
fn test_request_builder_sets_options() {
    let request = GenerateRequest::builder()
        .messages(vec![Message::system("Be brief"), Message::user("Go")])
        .max_tokens(Some(256))
        .temperature(Some(0.9))
        .build()
        .expect("valid request");

    assert_eq!(request.messages().len(), 2);
    assert_eq!(*request.max_tokens(), Some(256));
    assert_eq!(*request.temperature(), Some(0.9));
}

#[test]
fn test_joined_text_concatenates_outputs() {
    let response = GenerateResponse::builder()
        .outputs(vec![
            Output::Text("The keeper lit the lamp.".to_string()),
            Output::Text("Fog rolled in.".to_string()),
        ])
        .usage(Some(TokenUsageData::new(12, 9, 21)))
        .build()
        .expect("valid response");

    assert_eq!(
        response.joined_text(),
        "The keeper lit the lamp.\nFog rolled in."
    );
    assert_eq!(response.usage().map(|u| *u.total_tokens()), Some(21));
}

#[test]
fn test_joined_text_of_empty_response_is_empty() {
    let response = GenerateResponse::builder()
        .outputs(Vec::new())
        .build()
        .expect("valid response");
    assert_eq!(response.joined_text(), "");
}

#[test]
fn test_message_text_joins_inputs() {
    let message = Message::new(
        Role::User,
        vec![Input::Text("one".to_string()), Input::Text("two".to_string())],
    );
    assert_eq!(message.text(), "one\ntwo");
}

#[test]
fn test_init_observability_without_metrics() {
    let result = init_observability("taleweaver-test", 60);
    assert!(
        result.is_ok(),
        "Observability initialization should succeed: {:?}",
        result.err()
    );
    shutdown_observability();
}
