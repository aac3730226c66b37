use address_access::config::cli::to_search_params;
use address_access::config::Command;
use address_access::utils::error::ErrorSeverity;
use address_access::utils::logger::{self, LogFormat};
use address_access::utils::validation::Validate;
use address_access::{
    AccessConfig, AddressAccess, AddressError, CliConfig, Connectivity, FileCredentialStore,
    NewAddress, Session,
};
use clap::Parser;
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match AccessConfig::from_file(&cli.config).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    // 初始化日誌
    logger::init_logger(
        LogFormat::from_json_flag(cli.json_logs || config.json_logs()),
        cli.verbose,
        config.log_level(),
    );

    tracing::info!("Starting address-access CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: &AccessConfig) -> address_access::Result<()> {
    let credentials = FileCredentialStore::new(&config.credentials.path);

    match &cli.command {
        Command::Login { token } => {
            Session::login(&credentials, token).await?;
            println!("✅ Token stored");
            return Ok(());
        }
        Command::Logout => {
            Session::restore(&credentials).await?.logout(&credentials).await?;
            println!("✅ Token removed");
            return Ok(());
        }
        _ => {}
    }

    let session = Session::restore(&credentials).await?;
    let access = AddressAccess::from_config(config)?;
    let connectivity = Connectivity::from_offline_flag(cli.offline);

    match cli.command.clone() {
        Command::List => print_json(&access.get_addresses(&session, connectivity).await?),
        Command::Search { text } => print_json(
            &access
                .search_addresses(&session, &text, connectivity)
                .await?,
        ),
        Command::Filter { params } => {
            let params = to_search_params(params);
            print_json(
                &access
                    .filter_addresses(&session, &params, connectivity)
                    .await?,
            )
        }
        Command::Register(args) => {
            let address = NewAddress::from(args);
            print_json(
                &access
                    .register_address(&session, &address, connectivity)
                    .await?,
            )
        }
        Command::Get { id } => print_json(
            &access
                .get_one_address(&session, &id, connectivity)
                .await?,
        ),
        Command::Delete { id } => print_json(
            &access
                .delete_one_address(&session, &id, connectivity)
                .await?,
        ),
        Command::Login { .. } | Command::Logout => Ok(()),
    }
}

fn print_json<T: Serialize>(value: &T) -> address_access::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_code(e: &AddressError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 2,
        ErrorSeverity::Medium => 3,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 4,
    }
}
