use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use nerza_agents::{GenerationBackend, Latency, NerzaAgency};
use nerza_core::{
    build_itinerary_prompt, quote, services, BudgetTier, ContactInfo, Interest, ItineraryRequest,
    PriceQuote, Region,
};
use nerza_observability::{init_tracing, AppMetrics};

#[derive(Debug, Parser)]
#[command(name = "nerza")]
#[command(about = "Nerza Agency trip planner")]
struct Cli {
    /// Skip simulated payment and confirmation pauses; retry backoff still applies.
    #[arg(long, global = true)]
    no_delay: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Services,
    Tagline,
    Quote {
        #[arg(long, default_value = "Confort")]
        budget: String,
        #[arg(long, default_value_t = 3)]
        days: u32,
    },
    Prompt(TripArgs),
    Plan {
        #[command(flatten)]
        trip: TripArgs,
        #[command(flatten)]
        contact: ContactArgs,
        #[arg(long)]
        confirm: bool,
    },
    Book {
        #[arg(long)]
        service: u32,
        #[command(flatten)]
        contact: ContactArgs,
    },
}

#[derive(Debug, Args)]
struct TripArgs {
    #[arg(long)]
    region: String,
    #[arg(long = "interest")]
    interests: Vec<String>,
    #[arg(long, default_value_t = 3)]
    days: u32,
    #[arg(long, default_value = "Confort")]
    budget: String,
}

#[derive(Debug, Args)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
}

impl ContactArgs {
    fn into_contact(self) -> ContactInfo {
        ContactInfo::new(self.name, self.email, self.phone)
    }
}

struct ParsedTrip {
    region: Region,
    interests: Vec<Interest>,
    days: u32,
    budget: BudgetTier,
}

impl TripArgs {
    fn parse(&self) -> Result<ParsedTrip> {
        let region = Region::parse(&self.region)
            .with_context(|| format!("unknown region `{}`", self.region))?;
        let interests = self
            .interests
            .iter()
            .map(|value| Interest::parse(value).with_context(|| format!("unknown interest `{value}`")))
            .collect::<Result<Vec<_>>>()?;

        Ok(ParsedTrip {
            region,
            interests,
            days: self.days.max(1),
            budget: BudgetTier::from_label(&self.budget),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("nerza_cli");
    let cli = Cli::parse();

    let mut agency = NerzaAgency::from_env(AppMetrics::shared())?;
    if cli.no_delay {
        agency = agency.without_simulated_pauses();
    }

    run(cli.command, agency).await
}

async fn run<B, L>(command: Command, agency: NerzaAgency<B, L>) -> Result<()>
where
    B: GenerationBackend,
    L: Latency + Clone,
{
    match command {
        Command::Services => {
            println!("{}", serde_json::to_string_pretty(services())?);
        }
        Command::Tagline => {
            println!("{}", agency.studio().generate_tagline().await);
        }
        Command::Quote { budget, days } => {
            let quote = quote(BudgetTier::from_label(&budget), days.max(1));
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Command::Prompt(trip) => {
            let trip = trip.parse()?;
            for interest in &trip.interests {
                nerza_core::ensure_interest_offered(Some(trip.region), *interest)?;
            }
            println!(
                "{}",
                build_itinerary_prompt(&ItineraryRequest {
                    region: trip.region,
                    interests: trip.interests,
                    duration_days: trip.days,
                    budget: trip.budget,
                })
            );
        }
        Command::Plan {
            trip,
            contact,
            confirm,
        } => plan(&agency, trip.parse()?, contact.into_contact(), confirm).await?,
        Command::Book { service, contact } => {
            let confirmation = agency
                .booking_desk()
                .book(service, &contact.into_contact())
                .await
                .map_err(|err| anyhow::anyhow!("{}", err.user_message()))?;
            println!("{}", serde_json::to_string_pretty(&confirmation)?);
        }
    }

    Ok(())
}

async fn plan<B, L>(
    agency: &NerzaAgency<B, L>,
    trip: ParsedTrip,
    contact: ContactInfo,
    confirm: bool,
) -> Result<()>
where
    B: GenerationBackend,
    L: Latency + Clone,
{
    let mut configurator = agency.new_trip();
    configurator.select_region(trip.region)?;
    for interest in trip.interests {
        configurator.toggle_interest(interest)?;
    }
    configurator.set_duration(trip.days)?;
    configurator.set_budget(trip.budget)?;
    configurator.set_contact(contact)?;

    if configurator.submit(agency.studio()).await.is_err() {
        let message = configurator
            .error_message()
            .unwrap_or("itinerary generation failed")
            .to_string();
        bail!(message);
    }

    if let Some(itinerary) = configurator.itinerary() {
        println!("{}\n", render_markup(itinerary));
    }
    if let Some(quote) = configurator.quote() {
        println!("Prix estimé : {}", format_quote(&quote));
    }

    if confirm {
        configurator.finalize()?;
        let confirmation = configurator.confirm().await?;
        println!("Réservation confirmée : {}", confirmation.reference);
        configurator.dismiss_confirmation()?;
    }

    Ok(())
}

/// Terminal rendering of the `###` and `**` markers.
fn render_markup(text: &str) -> String {
    text.lines()
        .map(|line| match line.strip_prefix("### ") {
            Some(heading) => format!("\n== {} ==", heading.replace("**", "").trim()),
            None => line.replace("**", ""),
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_start()
        .to_string()
}

fn format_quote(quote: &PriceQuote) -> String {
    let digits = quote.amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    format!("{grouped} {}", PriceQuote::CURRENCY)
}
