//! Example Kling V2.1 video generation CLI.
//!
//! Submits a Master text-to-video task and polls until the video is ready.
//!
//! # Usage
//!
//! ```bash
//! KIE_API_KEY=... kling-demo "a cat surfing a wave at sunset"
//! ```

use kieai_core::Config;
use kieai_jobs::WaitOptions;
use kieai_model_plugins::kling::{self, KlingApi, KlingPlugin, MasterTextToVideoOptions};
use kieai_plugin::KieClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: kling-demo <prompt>");
        eprintln!("Example: kling-demo \"a cat surfing a wave at sunset\"");
        std::process::exit(1);
    }
    let prompt = args[1].clone();

    let api_key = std::env::var("KIE_API_KEY").unwrap_or_else(|_| {
        eprintln!("Error: KIE_API_KEY is not set. Put it in the environment or a .env file.");
        std::process::exit(1);
    });

    let mut client = KieClient::new(Config::new(api_key)).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });
    if let Err(err) = client.register(KlingPlugin::default()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
    let api = client.resolve::<KlingApi>(kling::NAME).unwrap_or_else(|err| {
        eprintln!("Error: {err}");
        std::process::exit(1);
    });

    let created = match api
        .master_text_to_video(
            &MasterTextToVideoOptions {
                prompt,
                ..Default::default()
            },
            None,
        )
        .await
    {
        Ok(created) => created,
        Err(err) => {
            eprintln!("Error creating task: {err}");
            std::process::exit(1);
        }
    };
    println!("Task created: {}", created.task_id);
    println!("Waiting for the video (this can take several minutes)...");

    match api
        .wait_for_completion(&created.task_id, &WaitOptions::video())
        .await
    {
        Ok(video) => {
            for url in video.result_urls {
                println!("{url}");
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
