mod prompt;
mod render;
mod repl;

use std::sync::Arc;

use petpal_core::account::{Account, Authenticator, InMemoryAccountStore};
use petpal_core::config::PetCfg;
use petpal_core::runtime::Runtime;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use prompt::{Input, Prompter};

const LOG_PATH: &str = "/tmp/petpal.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // JSON logs to a file, only when asked for; stdout belongs to the REPL.
    if std::env::var("RUST_LOG").is_ok() {
        let file = std::fs::File::create(LOG_PATH)?;
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().json().with_target(true).with_writer(file))
            .init();
    }

    let cfg = Arc::new(PetCfg::from_env()?);
    tracing::debug!(?cfg, "config loaded");

    let mut prompter = Prompter::spawn();
    let mut auth = Authenticator::new(InMemoryAccountStore::with_demo_account());
    let Some(account) = login(&mut prompter, &mut auth).await else {
        return Ok(());
    };

    let (mut runtime, cmd_tx, output_rx, mood_rx) =
        Runtime::new(Arc::clone(&cfg), &account.username);
    println!("{} Pet: {}", render::face(*mood_rx.borrow()), runtime.greeting());
    println!("(type /help for commands)");

    let token = runtime.token();
    tokio::spawn(cancel_on_ctrl_c(token.clone()));

    let session = repl::Session {
        cmd_tx,
        output_rx,
        mood_rx,
        token: token.clone(),
    };
    let ((), result) = tokio::join!(
        async {
            runtime.run().await;
            token.cancel();
        },
        async {
            let result = repl::run(&mut prompter, &cfg, session).await;
            token.cancel();
            result
        },
    );
    result?;

    println!("Bye! Take care of yourself 💜");
    Ok(())
}

/// Log in, or register with `/register`. `None` when the user leaves.
async fn login(
    prompter: &mut Prompter,
    auth: &mut Authenticator<InMemoryAccountStore>,
) -> Option<Account> {
    println!("🐾 AI Pet Companion: your emotional well-being friend");
    println!("Log in (demo / demo123), or enter /register to create an account.");

    loop {
        let first = field(prompter, "Username: ", true).await?;
        let result = if first == "/register" {
            let username = field(prompter, "New username: ", true).await?;
            let password = field(prompter, "Password: ", false).await?;
            let mail = field(prompter, "Mail: ", true).await?;
            auth.register(&username, &password, &mail)
        } else {
            let password = field(prompter, "Password: ", false).await?;
            auth.login(&first, &password)
        };
        match result {
            Ok(account) => return Some(account),
            Err(e) => println!("⚠️ {e}"),
        }
    }
}

async fn field(prompter: &mut Prompter, label: &str, remember: bool) -> Option<String> {
    if remember {
        prompter.ask(label);
    } else {
        prompter.ask_private(label);
    }
    match prompter.next().await {
        Input::Line(line) => Some(line.trim().to_owned()),
        Input::Quit => None,
        Input::Failed(err) => {
            eprintln!("input error: {err}");
            None
        }
    }
}

async fn cancel_on_ctrl_c(token: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("interrupted, shutting down");
        token.cancel();
    }
}
