mod common;

use std::sync::Arc;
use std::time::Duration;

use chat_relay::agent::{run_console, AgentSession, Role};
use common::GatedTransport;
use tokio::io::{AsyncWriteExt, BufReader};
use tokio::sync::Notify;

fn interrupt_from(notify: &Arc<Notify>) -> impl FnMut() -> futures::future::BoxFuture<'static, ()> {
    let notify = Arc::clone(notify);
    move || {
        let notify = Arc::clone(&notify);
        Box::pin(async move { notify.notified().await })
    }
}

#[tokio::test]
async fn test_console_prints_answers_until_end_of_input() {
    let transport = GatedTransport::answering(Some("hi back"));
    transport.release();
    let session = Arc::new(AgentSession::new(transport.clone()));
    let never = Arc::new(Notify::new());

    let mut output = Vec::new();
    run_console(
        Arc::clone(&session),
        &b"  \nhello\n"[..],
        &mut output,
        interrupt_from(&never),
    )
    .await
    .unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "assistant> hi back\n");
    assert_eq!(transport.call_count(), 1);
    assert_eq!(session.turns().len(), 2);
}

#[tokio::test]
async fn test_console_interrupt_cancels_pending_request() {
    let transport = GatedTransport::answering(Some("too late"));
    let session = Arc::new(AgentSession::new(transport.clone()));
    let interrupt = Arc::new(Notify::new());

    let mut output = Vec::new();
    let console = run_console(
        Arc::clone(&session),
        &b"slow question\n"[..],
        &mut output,
        interrupt_from(&interrupt),
    );
    let driver = async {
        transport.started.notified().await;
        interrupt.notify_one();
    };

    let (result, ()) = tokio::join!(console, driver);
    result.unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "[Request cancelled]\n");
    let turns = session.turns();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role, Role::User);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_console_interrupt_at_prompt_exits_after_a_request() {
    let transport = GatedTransport::answering(Some("done"));
    transport.release();
    let session = Arc::new(AgentSession::new(transport.clone()));
    let interrupt = Arc::new(Notify::new());

    // Input stays open, so only the interrupt can end the loop
    let (mut writer, reader) = tokio::io::duplex(64);
    let mut output = Vec::new();
    let console = run_console(
        Arc::clone(&session),
        BufReader::new(reader),
        &mut output,
        interrupt_from(&interrupt),
    );
    let driver = async {
        writer.write_all(b"first\n").await.unwrap();
        while session.turns().len() < 2 || session.is_busy() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        interrupt.notify_one();
    };

    let (result, ()) = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::join!(console, driver)
    })
    .await
    .expect("console should stop on interrupt at the prompt");
    result.unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "assistant> done\n");
    assert_eq!(transport.call_count(), 1);
    drop(writer);
}
