use crate::helpers::{controller, mp3_fixture, MockLanguageDirectory, MockSynthesisApi};
use echotext_client::domain::language::example_text;
use echotext_client::domain::synthesis::{RequestState, SynthesisRequestController, MAX_TEXT_CHARS};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn it_should_start_idle_with_empty_form_and_default_language() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(0)));
    let c = controller(api);

    assert_eq!(*c.state(), RequestState::Idle);
    assert_eq!(c.form().text(), "");
    assert_eq!(c.form().language(), "zh");
    assert!(!c.can_submit());
}

#[tokio::test]
async fn it_should_synthesize_text_to_speech() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(7)));
    let mut c = controller(api.clone());

    c.update_text("你好");
    c.submit().await;

    match c.state() {
        RequestState::Succeeded(handle) => {
            assert_eq!(c.audio().bytes(*handle), Some(&mp3_fixture(7)[..]));
        }
        other => panic!("expected Succeeded, got {:?}", other),
    }

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, "你好");
    assert_eq!(requests[0].lang, "zh");
}

#[tokio::test]
async fn it_should_send_the_selected_language() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(1)));
    let mut c = controller(api.clone());

    c.update_language("fr");
    c.update_text("Bonjour");
    c.submit().await;

    assert_eq!(api.requests()[0].lang, "fr");
}

#[tokio::test]
async fn it_should_trim_text_before_sending() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(2)));
    let mut c = controller(api.clone());

    c.update_text("  hello world  \n");
    c.submit().await;

    assert_eq!(api.requests()[0].text, "hello world");
}

#[tokio::test]
async fn it_should_not_apply_text_beyond_the_limit() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(3)));
    let mut c = controller(api);

    c.update_text(&"a".repeat(MAX_TEXT_CHARS + 500));
    assert_eq!(c.text_len(), MAX_TEXT_CHARS);

    // Multi-byte text is clipped at a character boundary, same count.
    c.update_text(&"语".repeat(MAX_TEXT_CHARS * 2));
    assert_eq!(c.text_len(), MAX_TEXT_CHARS);
}

#[tokio::test]
async fn it_should_reject_empty_text_without_calling_the_service() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(4)));
    let mut c = controller(api.clone());

    c.submit().await;
    assert_eq!(
        *c.state(),
        RequestState::Failed("请输入要转换的文本".to_string())
    );
    assert_eq!(api.call_count(), 0);

    c.update_text("   ");
    c.submit().await;
    assert_eq!(
        *c.state(),
        RequestState::Failed("请输入要转换的文本".to_string())
    );
    assert_eq!(api.call_count(), 0);
}

#[tokio::test]
async fn it_should_block_reentry_while_submitting() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(5)));
    let mut c = controller(api.clone());

    c.update_text("你好");
    let request = c.begin_submit();
    assert!(request.is_some());
    assert_eq!(*c.state(), RequestState::Submitting);
    assert!(!c.can_submit());

    // A second submit while the first is pending never reaches the service.
    c.submit().await;
    assert_eq!(api.call_count(), 0);
    assert_eq!(*c.state(), RequestState::Submitting);
}

#[tokio::test]
async fn it_should_allow_resubmitting_after_success() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(6)));
    let mut c = controller(api.clone());

    c.update_text("first");
    c.submit().await;
    assert!(matches!(c.state(), RequestState::Succeeded(_)));

    c.update_text("second");
    c.submit().await;
    assert!(matches!(c.state(), RequestState::Succeeded(_)));
    assert_eq!(api.call_count(), 2);
    assert_eq!(api.requests()[1].text, "second");
}

#[tokio::test]
async fn it_should_clear_to_idle_preserving_language() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(8)));
    let mut c = controller(api);

    c.update_language("es");
    c.update_text("Hola");
    c.submit().await;
    assert!(matches!(c.state(), RequestState::Succeeded(_)));

    c.clear();
    assert_eq!(*c.state(), RequestState::Idle);
    assert_eq!(c.form().text(), "");
    assert_eq!(c.form().language(), "es");
    assert_eq!(c.audio().live(), 0);
}

#[tokio::test]
async fn it_should_clear_from_failed_state() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(9)));
    let mut c = controller(api);

    c.submit().await;
    assert!(matches!(c.state(), RequestState::Failed(_)));

    c.clear();
    assert_eq!(*c.state(), RequestState::Idle);
}

#[tokio::test]
async fn it_should_reset_a_failure_when_text_is_edited() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(10)));
    let mut c = controller(api);

    c.submit().await;
    assert!(matches!(c.state(), RequestState::Failed(_)));

    c.update_text("now with content");
    assert_eq!(*c.state(), RequestState::Idle);
    assert!(c.can_submit());
}

#[tokio::test]
async fn it_should_keep_a_success_playable_while_editing() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(11)));
    let mut c = controller(api);

    c.update_text("你好");
    c.submit().await;

    c.update_text("another draft");
    assert!(matches!(c.state(), RequestState::Succeeded(_)));
    assert_eq!(c.audio().live(), 1);
}

#[tokio::test]
async fn it_should_ignore_language_codes_outside_the_catalog() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(12)));
    let mut c = controller(api);

    c.update_language("xx");
    assert_eq!(c.form().language(), "zh");
}

#[tokio::test]
async fn it_should_load_the_example_for_the_selected_language() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(13)));
    let mut c = controller(api);

    c.update_language("ja");
    c.load_example_text();
    assert_eq!(c.form().text(), example_text("ja"));
}

#[tokio::test]
async fn it_should_fall_back_to_the_chinese_example() {
    let api = MockSynthesisApi::always(Ok(mp3_fixture(14)));
    let directory = MockLanguageDirectory::serving(&[("de", "Deutsch"), ("zh", "中文")]);
    let mut c = SynthesisRequestController::new(api, directory);
    c.initialize().await;

    c.update_language("de");
    c.load_example_text();
    assert_eq!(c.form().text(), example_text("zh"));
}
