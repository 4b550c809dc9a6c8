use clap::{Parser, Subcommand};
use std::path::PathBuf;

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "blurd")]
#[command(version = BUILD_VERSION)]
#[command(about = "Blurd - Private identity proofs and payments from the command line")]
#[command(propagate_version = true)]
pub struct Cli {
    #[arg(
        short = 'd',
        long,
        global = true,
        value_name = "DIR",
        env = "BLURD_DATA_DIR",
        help = "Data directory path"
    )]
    pub data_dir: Option<PathBuf>,

    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract identity fields from document OCR text
    Extract {
        /// Path to a file holding the raw OCR text
        file: PathBuf,
    },

    /// Register a credential from document OCR text
    Register {
        /// Holder account address (0x...)
        holder: String,
        /// Path to a file holding the raw OCR text
        file: PathBuf,
    },

    /// Generate an age proof from the registered credential
    ProveAge {
        /// Holder account address (0x...)
        holder: String,
        /// Required minimum age
        #[arg(long, default_value_t = 18)]
        min_age: u8,
    },

    /// Generate a country proof from the registered credential
    ProveCountry {
        /// Holder account address (0x...)
        holder: String,
        /// Allowed ISO alpha-2 codes, comma separated
        #[arg(long, value_delimiter = ',')]
        allowed: Vec<String>,
    },

    /// Generate a per-scope uniqueness proof
    ProveUnique {
        /// Holder account address (0x...)
        holder: String,
        /// Scope string, typically a merchant identifier
        #[arg(long)]
        scope: String,
        /// Identity secret as 64 hex chars; generated when omitted
        #[arg(long)]
        secret: Option<String>,
    },

    /// Send a private payment
    Send {
        /// Sender account address (0x...)
        sender: String,
        /// Recipient account address (0x...)
        recipient: String,
        /// Amount, in base units ("1500000000000000000") or decimal ("1.5")
        amount: String,
    },

    /// Re-verify a stored payment commitment
    VerifyPayment {
        /// Hex commitment of the payment
        commitment: String,
    },

    /// Export the privacy-preserving receipt for a payment
    ExportReceipt {
        /// Hex commitment of the payment
        commitment: String,
        /// Detached wallet signature to embed
        #[arg(long)]
        signature: Option<String>,
    },

    /// Verify a proof record from a proof.json file
    VerifyProof {
        /// Path to the proof.json file
        file: PathBuf,
        /// Check as an age proof with this minimum age
        #[arg(long)]
        min_age: Option<u8>,
        /// Check as a country proof with these allowed codes
        #[arg(long, value_delimiter = ',')]
        allowed: Option<Vec<String>>,
        /// Check as a payment proof with this required amount
        #[arg(long)]
        amount: Option<String>,
    },

    /// Ask the backend whether a nullifier has been seen before
    CheckUnique {
        /// Hex uniqueness nullifier
        nullifier: String,
    },

    /// Fetch the merchant dashboard counters from the backend
    Metrics,
}
