use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use dogpassport::model::{
    BlogCategory, DocumentCategory, GuideType, PartnerCategory, RecordStatus, SupportCategory,
};
use dogpassport::passport::PassportMode;
use dogpassport::views::AudienceFilter;

#[derive(Parser, Debug)]
#[command(name = "dogpassport", version, about = "Dog Passport handler CLI")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, global = true, help = "JSON config file")]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Act as this fixture user (default: config default)")]
    pub user: Option<String>,
    #[arg(long, global = true, help = "Evaluate expiry against this date (YYYY-MM-DD)")]
    pub today: Option<NaiveDate>,
    #[arg(long, global = true, help = "Skip simulated network delays")]
    pub instant: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dogs owned by the current user.
    Dogs,
    /// Checkmark status of one dog.
    Status {
        dog: String,
    },
    /// A dog's vet records.
    Records {
        dog: String,
        #[arg(long, value_parser = parse_enum::<DocumentCategory>)]
        category: Option<DocumentCategory>,
        #[arg(long, value_parser = parse_enum::<RecordStatus>)]
        status: Option<RecordStatus>,
    },
    /// Bottom navigation with badge counts.
    Nav {
        #[arg(long, default_value = "/dashboard")]
        route: String,
    },
    /// Passport card for a venue mode.
    Passport {
        dog: String,
        #[arg(long, value_parser = parse_enum::<PassportMode>, default_value = "default")]
        mode: PassportMode,
    },
    /// Public status lookup by dog id, QR code or NFC token.
    Verify {
        credential: String,
        #[arg(long)]
        org: Option<String>,
    },
    /// Internal verification scores (admin).
    Scores {
        dog: String,
    },
    /// Dogs requiring human review (admin).
    ReviewQueue,
    /// Dogs with fraud flags (admin).
    Fraud,
    Blog {
        #[arg(long, value_parser = parse_enum::<BlogCategory>)]
        category: Option<BlogCategory>,
    },
    Support {
        #[arg(long, value_parser = parse_enum::<SupportCategory>)]
        category: Option<SupportCategory>,
        #[arg(long)]
        query: Option<String>,
    },
    Travel {
        #[arg(long = "type", value_parser = parse_enum::<GuideType>)]
        guide_type: Option<GuideType>,
    },
    Partners {
        #[arg(long, value_parser = parse_enum::<PartnerCategory>)]
        category: Option<PartnerCategory>,
    },
    Learn {
        #[arg(long, value_parser = parse_enum::<AudienceFilter>, default_value = "all")]
        audience: AudienceFilter,
    },
    /// Upcoming appointments, soonest first.
    Appointments {
        dog: String,
    },
    Meals {
        dog: String,
    },
    /// Run the verification request wizard end to end.
    RequestVerification {
        dog: String,
    },
    /// Classify files and add them to a dog's wallet.
    Upload {
        dog: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Group a dog's records into wallet sections.
    Wallet {
        dog: String,
    },
    /// Automated review of one record.
    Analyze {
        dog: String,
        record: String,
    },
    /// Report fixture checkmarks that break the status invariants.
    AuditFixtures,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

/// Parse a CLI value using the type's serde name (`expiring-soon`,
/// `training-cert`, `national-park`, ...).
pub fn parse_enum<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("unknown value '{s}'"))
}
