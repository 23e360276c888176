//! Dog Passport CLI.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │   SystemClock (Clock)  LogEventSink  MemoryStorage       │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │   ┌──────────────────────────────────────────────────┐   │
//! │   │         PassportService (pure logic)             │   │
//! │   │  Session · Wizard · Engine · Documents · Audit   │   │
//! │   └──────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

mod cli;
mod output;

use anyhow::{Context, bail};
use clap::Parser;
use futures_lite::future::block_on;

use dogpassport::adapters::clock::SystemClock;
use dogpassport::adapters::log_sink::LogEventSink;
use dogpassport::adapters::memory::MemoryStorage;
use dogpassport::app::ports::Clock;
use dogpassport::app::service::PassportService;
use dogpassport::config::{PassportConfig, SimulatedDelays};
use dogpassport::{nav, passport, views};

use cli::{Cli, Commands};
use output::{print_one, print_out};

type Service = PassportService<SystemClock, MemoryStorage>;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => PassportConfig::load(path)?,
        None => PassportConfig::default(),
    };
    if cli.instant {
        config.delays = SimulatedDelays::instant();
    }
    let clock = cli.today.map_or_else(SystemClock::new, SystemClock::pinned);

    let mut sink = LogEventSink::new();
    let mut svc = Service::with_fixtures(config, clock, MemoryStorage::new())?;
    let user = cli
        .user
        .clone()
        .unwrap_or_else(|| svc.config().default_user_id.clone());
    svc.switch_user(&user, &mut sink)?;
    svc.start(&mut sink);

    block_on(dispatch(cli, &mut svc, &mut sink))
}

async fn dispatch(cli: Cli, svc: &mut Service, sink: &mut LogEventSink) -> anyhow::Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Dogs => {
            let user = svc.session().require_user()?;
            let store = svc.store();
            let dogs = views::dogs_of_user(store, &user.id);
            print_out(json, &dogs, |d| {
                format!(
                    "{}\t{}\t{}\t{}",
                    d.id,
                    d.name,
                    d.breed,
                    store.displayed_checkmark(d).label()
                )
            })?;
        }
        Commands::Status { dog } => {
            let store = svc.store();
            let d = store.dog(&dog)?;
            let status = DogStatus::new(store, d, svc.config().yellow_checkmark_valid_days);
            print_one(json, status, |s| {
                let mut line = format!("{} ({}): {}", s.name, s.dog_id, s.label);
                if let Some(days) = s.yellow_valid_days {
                    line.push_str(&format!(" (valid for {days} days)"));
                }
                format!("{line}\n{}", s.description)
            })?;
        }
        Commands::Records {
            dog,
            category,
            status,
        } => {
            let store = svc.store();
            let d = store.dog(&dog)?;
            let records = views::records_for_dog(store, &d.id, category, status);
            print_out(json, &records, |r| {
                format!(
                    "{}\t{}\t{}\t{}\t{}",
                    r.id,
                    r.file_name,
                    r.category.as_str(),
                    r.status.as_str(),
                    r.expiration_date
                        .map_or_else(|| "-".to_string(), |d| d.to_string())
                )
            })?;
        }
        Commands::Nav { route } => {
            let items = nav::nav_items(
                svc.store(),
                svc.current_user(),
                &route,
                svc.config().nav_badge_cap,
            );
            print_out(json, &items, |i| {
                format!(
                    "{}{}\t{}{}",
                    if i.active { "* " } else { "  " },
                    i.label,
                    i.href,
                    i.badge_label
                        .as_ref()
                        .map_or_else(String::new, |b| format!("\t[{b}]"))
                )
            })?;
        }
        Commands::Passport { dog, mode } => {
            let store = svc.store();
            let d = store.dog(&dog)?;
            let card = passport::card(store, d, mode, svc.clock().now())?;
            print_one(json, card, |c| {
                let mut out = format!(
                    "{} - {}\n{}\n{}: {}",
                    c.title, c.description, c.dog_name, c.breed, c.checkmark_label
                );
                for b in &c.mode_badges {
                    out.push_str(&format!("\n  + {b}"));
                }
                for doc in &c.required_documents {
                    let mark = if doc.present { "x" } else { " " };
                    out.push_str(&format!("\n  [{mark}] {}", doc.name));
                }
                out.push_str(&format!("\nQR {}", c.qr_payload));
                out
            })?;
        }
        Commands::Verify { credential, org } => {
            let summary = svc.lookup(&credential, org.as_deref(), sink)?;
            print_one(json, summary, |s| {
                format!(
                    "{} ({}) handled by {}\nlevel: {:?}\nvaccinations: {:?}\ntasks: {}",
                    s.dog_name,
                    s.dog_id,
                    s.handler_name,
                    s.verification_level,
                    s.vaccination_status,
                    s.tasks_description
                )
            })?;
        }
        Commands::Scores { dog } => {
            let assessment = svc.assess(&dog)?;
            print_one(json, assessment, |a| {
                let s = &a.scores;
                format!(
                    "level: {:?}\neligibility {:.2} training {:.2} health {:.2} breed {:.2}\nfraud risk {:.2}\nreview: {}",
                    a.level,
                    s.service_eligibility,
                    s.training_evidence,
                    s.health_completeness,
                    s.breed_compatibility,
                    s.fraud_risk,
                    s.review_reason.as_deref().unwrap_or("no")
                )
            })?;
        }
        Commands::ReviewQueue => {
            let queue = svc.review_queue();
            print_out(json, &queue, |s| {
                format!("{}\t{}", s.dog_id, s.review_reason.as_deref().unwrap_or(""))
            })?;
        }
        Commands::Fraud => {
            let flagged = svc.fraud_list();
            print_out(json, &flagged, |s| {
                format!("{}\t{}", s.dog_id, s.fraud_flags.join("; "))
            })?;
        }
        Commands::Blog { category } => {
            let posts = views::blog_posts(svc.store(), category);
            print_out(json, &posts, |p| {
                format!("{}\t{}\t{}", p.id, p.title, p.author)
            })?;
        }
        Commands::Support { category, query } => {
            let topics = views::support_topics(svc.store(), category, query.as_deref());
            print_out(json, &topics, |t| format!("{}\t{}", t.id, t.question))?;
        }
        Commands::Travel { guide_type } => {
            let guides = views::travel_guides(svc.store(), guide_type);
            print_out(json, &guides, |g| {
                format!("{}\t{}\t{}", g.id, g.title, g.destination)
            })?;
        }
        Commands::Partners { category } => {
            let partners = views::partners(svc.store(), category);
            print_out(json, &partners, |p| {
                format!("{}\t{}\t{}", p.id, p.name, p.badge)
            })?;
        }
        Commands::Learn { audience } => {
            let cards = views::education_cards(svc.store(), audience);
            print_out(json, &cards, |c| {
                format!("{}\t{}\t{} min", c.id, c.title, c.read_time)
            })?;
        }
        Commands::Appointments { dog } => {
            let store = svc.store();
            store.dog(&dog)?;
            let upcoming = views::upcoming_appointments(store, &dog);
            print_out(json, &upcoming, |a| {
                format!("{}\t{}\t{}", a.id, a.date, a.title)
            })?;
        }
        Commands::Meals { dog } => {
            let store = svc.store();
            store.dog(&dog)?;
            let meals = views::meals_for_dog(store, &dog);
            print_out(json, &meals, |m| {
                format!("{}\t{}\t{} ({})", m.id, m.date, m.food_type, m.amount)
            })?;
        }
        Commands::RequestVerification { dog } => {
            let snapshot = svc.request_verification(&dog, sink).await?;
            print_one(json, snapshot, |s| {
                format!(
                    "{}: {}\nhandler: {}\nvet: {}",
                    s.dog_id,
                    s.state_name,
                    s.handler_signature.as_deref().unwrap_or("-"),
                    s.vet_signature.as_deref().unwrap_or("-")
                )
            })?;
        }
        Commands::Upload { dog, files } => {
            let mut loaded = Vec::with_capacity(files.len());
            for path in &files {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                loaded.push((name, bytes));
            }
            let uploaded = svc.upload(&dog, &loaded, sink).await?;
            print_out(json, &uploaded, |u| {
                format!(
                    "{}\t{}\t{:?}\t{:.2}\t{:?}",
                    u.record_id,
                    u.document.file_name,
                    u.document.detected_type,
                    u.document.confidence,
                    u.document.status
                )
            })?;
        }
        Commands::Wallet { dog } => {
            let wallet = svc.ai_sort(&dog).await?;
            print_one(json, &wallet, |w| {
                w.iter()
                    .map(|(cat, records)| {
                        let names: Vec<&str> =
                            records.iter().map(|r| r.file_name.as_str()).collect();
                        format!("{}: {}", cat.label(), names.join(", "))
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })?;
        }
        Commands::Analyze { dog, record } => {
            let owner = &svc.store().record(&record)?.dog_id;
            if *owner != dog {
                bail!("record '{record}' does not belong to dog '{dog}'");
            }
            let analysis = svc.analyze_record(&record, sink)?;
            let verified = svc.store().dog(&dog)?.verified;
            print_one(json, analysis, |a| {
                let mut out = format!(
                    "{:?} (risk {:.2})\ndog verified: {verified}",
                    a.decision, a.risk_score
                );
                for issue in &a.issues {
                    out.push_str(&format!("\n  - {issue}"));
                }
                out
            })?;
        }
        Commands::AuditFixtures => {
            let violations = svc.store().audit();
            print_out(json, &violations, ToString::to_string)?;
        }
        Commands::Login { email, password } => {
            svc.login(&email, &password, sink)
                .await
                .context("Login failed. Please try again.")?;
            print_session(json, svc)?;
        }
        Commands::Signup {
            name,
            email,
            password,
        } => {
            svc.signup(&name, &email, &password, sink)
                .await
                .context("Signup failed. Please try again.")?;
            print_session(json, svc)?;
        }
    }
    Ok(())
}

fn print_session(json: bool, svc: &Service) -> anyhow::Result<()> {
    let user = svc.session().require_user()?;
    print_one(json, user, |u| {
        format!(
            "Signed in as {} <{}> ({})",
            u.name,
            u.email,
            nav::subscription_badge(u.subscription_tier)
        )
    })
}

// ── Status view ──────────────────────────────────────────────

#[derive(Debug, serde::Serialize)]
struct DogStatus {
    dog_id: String,
    name: String,
    checkmark: dogpassport::model::CheckmarkStatus,
    label: &'static str,
    description: &'static str,
    /// Authored value, shown when it disagrees with the derived one.
    fixture_checkmark: dogpassport::model::CheckmarkStatus,
    subscription_tier: dogpassport::model::SubscriptionTier,
    service_dog_info_submitted: bool,
    vet_info_uploaded: bool,
    vet_verification_status: dogpassport::model::VetVerificationStatus,
    yellow_valid_days: Option<u32>,
}

impl DogStatus {
    fn new(
        store: &dogpassport::fixtures::Store,
        dog: &dogpassport::model::Dog,
        yellow_days: u32,
    ) -> Self {
        let checkmark = store.displayed_checkmark(dog);
        Self {
            dog_id: dog.id.clone(),
            name: dog.name.clone(),
            checkmark,
            label: checkmark.label(),
            description: checkmark.description(),
            fixture_checkmark: dog.checkmark_status,
            subscription_tier: store.owner_tier(dog),
            service_dog_info_submitted: dog.service_dog_info_submitted,
            vet_info_uploaded: dog.vet_info_uploaded,
            vet_verification_status: dog.vet_verification_status,
            yellow_valid_days: (checkmark == dogpassport::model::CheckmarkStatus::Yellow)
                .then_some(yellow_days),
        }
    }
}
