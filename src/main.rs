use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use echotext_client::domain::synthesis::{
    RequestState, SynthesisRequestController, MAX_TEXT_CHARS,
};
use echotext_client::infrastructure::api::HttpTtsApi;
use echotext_client::infrastructure::config::{Config, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!("Starting echotext client against {}", config.base_url);

    let api = Arc::new(HttpTtsApi::new(
        config.base_url.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?);

    let mut controller = SynthesisRequestController::new(api.clone(), api);

    // Best effort: a failure here falls back to the built-in catalog and the
    // form stays usable.
    controller.initialize().await;

    run(controller).await?;

    Ok(())
}

async fn run(mut controller: SynthesisRequestController) -> anyhow::Result<()> {
    println!("文字转语音客户端");
    print_languages(&controller);
    println!("输入文本后回车即开始转换；命令: :lang <代码>  :langs  :example  :submit  :clear  :quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":q" => break,
            ":langs" => print_languages(&controller),
            ":clear" => {
                controller.clear();
                println!("已清空");
            }
            ":example" => {
                controller.load_example_text();
                println!(
                    "{}  ({}/{} 字符)",
                    controller.form().text(),
                    controller.text_len(),
                    MAX_TEXT_CHARS
                );
            }
            ":submit" => synthesize(&mut controller).await?,
            _ => {
                if let Some(code) = line.strip_prefix(":lang ") {
                    let code = code.trim();
                    controller.update_language(code);
                    if controller.form().language() == code {
                        println!("语言: {}", controller.catalog().display_name(code));
                    } else {
                        println!("未知语言代码: {}", code);
                    }
                    continue;
                }

                controller.update_text(line);
                synthesize(&mut controller).await?;
            }
        }
    }

    Ok(())
}

async fn synthesize(controller: &mut SynthesisRequestController) -> anyhow::Result<()> {
    controller.submit().await;

    match controller.state() {
        RequestState::Succeeded(handle) => {
            let bytes = controller
                .audio()
                .bytes(*handle)
                .expect("a just-succeeded request holds live audio");
            let path = write_audio(bytes).await?;
            println!("生成的语音: {}", path.display());
            println!(
                "语言: {}",
                controller
                    .catalog()
                    .display_name(controller.form().language())
            );
            println!("文本长度: {} 字符", controller.text_len());
        }
        RequestState::Failed(message) => println!("⚠️ {}", message),
        _ => {}
    }

    Ok(())
}

/// Materialize audio bytes into a playable file, named the way the synthesis
/// service names its own output.
async fn write_audio(bytes: &[u8]) -> anyhow::Result<PathBuf> {
    let path = std::env::temp_dir().join(format!("tts_{}.mp3", uuid::Uuid::new_v4().simple()));
    tokio::fs::write(&path, bytes)
        .await
        .with_context(|| format!("failed to write audio to {}", path.display()))?;
    Ok(path)
}

fn print_languages(controller: &SynthesisRequestController) {
    let listing: Vec<String> = controller
        .catalog()
        .iter()
        .map(|(code, name)| format!("{} ({})", code, name))
        .collect();
    println!("支持的语言: {}", listing.join(", "));
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "echotext_client=info".into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "echotext_client=info".into()),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
