mod commands;

use anyhow::{anyhow, Context, Result};
use blurd_crypto::random_bytes;
use blurd_extract::extract_fields;
use blurd_proofs::ProofRecord;
use blurd_types::{Address, TokenAmount, TOKEN_DECIMALS};
use blurd_verifier::{
    verify_age_proof, verify_country_proof, verify_payment_proof, verify_proof_record,
    BackendClient,
};
use blurd_wallet::{FileStore, Wallet};
use clap::Parser;
use commands::{Cli, Commands};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        "warn"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "info,blurd_wallet=debug,blurd_verifier=debug",
            2 => "debug",
            _ => "trace",
        }
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(cli.verbose >= 2)
        .init();
}

fn open_wallet(data_dir: &Path) -> Result<Wallet<FileStore>> {
    let store = FileStore::new(data_dir)?;
    Ok(Wallet::new(store))
}

/// Accept an amount as either a human decimal ("1.5") or base units
/// ("1500000000000000000"), normalizing to base units.
fn parse_amount(s: &str) -> Result<String> {
    let amount = if s.contains('.') {
        TokenAmount::from_decimal(s, TOKEN_DECIMALS)?
    } else {
        TokenAmount::from_base_units(s, TOKEN_DECIMALS)?
    };
    Ok(amount.to_base_units())
}

fn parse_secret(secret: Option<String>) -> Result<[u8; 32]> {
    match secret {
        Some(s) => {
            let bytes = hex::decode(s.trim_start_matches("0x"))
                .context("Secret must be hex")?;
            bytes
                .try_into()
                .map_err(|_| anyhow!("Secret must be exactly 32 bytes"))
        }
        None => Ok(random_bytes::<32>()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| {
        dirs::home_dir()
            .map(|h| h.join(".blurd"))
            .unwrap_or_else(|| PathBuf::from(".blurd"))
    });

    match cli.command {
        Commands::Extract { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            print_json(&extract_fields(&text))?;
        }

        Commands::Register { holder, file } => {
            let holder = Address::from_hex(&holder)?;
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let record = open_wallet(&data_dir)?.register_credential(holder, &text)?;
            print_json(&record)?;
        }

        Commands::ProveAge { holder, min_age } => {
            let holder = Address::from_hex(&holder)?;
            let record = open_wallet(&data_dir)?.prove_age(&holder, min_age)?;
            print_json(&record)?;
        }

        Commands::ProveCountry { holder, allowed } => {
            let holder = Address::from_hex(&holder)?;
            let record = open_wallet(&data_dir)?.prove_country(&holder, allowed)?;
            print_json(&record)?;
        }

        Commands::ProveUnique {
            holder,
            scope,
            secret,
        } => {
            let holder = Address::from_hex(&holder)?;
            let secret = parse_secret(secret)?;
            let record = open_wallet(&data_dir)?.prove_uniqueness(&holder, &scope, secret)?;
            eprintln!("secret: {}", hex::encode(secret));
            print_json(&record)?;
        }

        Commands::Send {
            sender,
            recipient,
            amount,
        } => {
            let sender = Address::from_hex(&sender)?;
            let recipient = Address::from_hex(&recipient)?;
            let amount = parse_amount(&amount)?;
            let record =
                open_wallet(&data_dir)?.send_private_payment(sender, recipient, &amount)?;
            print_json(&record)?;
        }

        Commands::VerifyPayment { commitment } => {
            let valid = open_wallet(&data_dir)?.verify_payment(&commitment)?;
            println!("{}", if valid { "valid" } else { "TAMPERED" });
            if !valid {
                std::process::exit(1);
            }
        }

        Commands::ExportReceipt {
            commitment,
            signature,
        } => {
            let receipt = open_wallet(&data_dir)?.export_receipt(&commitment, signature)?;
            print_json(&receipt)?;
        }

        Commands::VerifyProof {
            file,
            min_age,
            allowed,
            amount,
        } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let record: ProofRecord =
                serde_json::from_str(&raw).context("Not a proof record")?;

            let valid = if let Some(min_age) = min_age {
                verify_age_proof(&record, min_age)?
            } else if let Some(allowed) = allowed {
                verify_country_proof(&record, &allowed)?
            } else if let Some(amount) = amount {
                verify_payment_proof(&record, &amount)?
            } else {
                verify_proof_record(&record)?
            };

            println!("{}", if valid { "valid" } else { "INVALID" });
            if !valid {
                std::process::exit(1);
            }
        }

        Commands::CheckUnique { nullifier } => {
            let unique = BackendClient::new().check_unique(&nullifier).await?;
            println!("{}", if unique { "unique" } else { "already seen" });
        }

        Commands::Metrics => {
            let metrics = BackendClient::new().merchant_metrics().await?;
            print_json(&metrics)?;
        }
    }

    Ok(())
}
