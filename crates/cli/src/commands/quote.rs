use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;

use motoquote_core::config::{AppConfig, BrandingConfig};
use motoquote_core::domain::{
    AddOns, CoverageDraft, CoverageType, DurationMonths, EngineType, PersonalDraft, Quote,
    VehicleDraft,
};
use motoquote_core::state::{ProgressStore, QuoteState};
use motoquote_core::wizard::{WizardError, WizardSession, WizardStep, STEP_COUNT};
use motoquote_store::{FileProgressStore, InMemoryQuoteRepository, QuoteRepository};
use tracing::info;

use crate::commands::CommandResult;

pub fn run(config: &AppConfig) -> CommandResult {
    let store = FileProgressStore::at_dir(&config.storage.data_dir);
    let mut session = WizardSession::resume_or_start(store);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome =
        run_wizard(&mut session, &mut stdin.lock(), &mut stdout.lock(), &config.branding);

    match outcome {
        Ok(WizardOutcome::Submitted(quote)) => record_submission(quote),
        Ok(WizardOutcome::Exited) => CommandResult::success(
            "Progress saved. Run `motoquote quote` again to continue where you left off.",
        ),
        Err(error) => CommandResult::failure(format!("input/output error: {error}"), 3),
    }
}

fn record_submission(quote: Quote) -> CommandResult {
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    let repository = InMemoryQuoteRepository::default();
    match runtime.block_on(repository.save(quote)) {
        Ok(record) => {
            info!(event_name = "quote.submitted", quote_id = %record.id.0, "quote recorded");
            CommandResult::success(format!(
                "Quote submitted. Reference: {}\nRun `motoquote export` to download the document \
                 or `motoquote email` to draft the summary email.",
                record.id.0
            ))
        }
        Err(error) => CommandResult::failure(format!("could not record the quote: {error}"), 4),
    }
}

pub enum WizardOutcome {
    Submitted(Quote),
    Exited,
}

enum StepFlow {
    Continue,
    Submitted(Quote),
    Exit,
}

/// One line of interactive input against a prompt that may carry a
/// current value.
enum Reply {
    Entered(String),
    Kept,
    Eof,
}

/// Drive the wizard over the given input and output streams until the
/// quote is submitted or the input ends.
///
/// Every accepted submission is persisted through the session's store, so
/// ending the input midway never loses progress.
pub fn run_wizard<P: ProgressStore, R: BufRead, W: Write>(
    session: &mut WizardSession<P>,
    input: &mut R,
    output: &mut W,
    branding: &BrandingConfig,
) -> io::Result<WizardOutcome> {
    if *session.state() != QuoteState::initial() {
        writeln!(
            output,
            "Resuming your saved quote (step {} of {}).",
            session.current_step().index(),
            STEP_COUNT,
        )?;
    }

    loop {
        let flow = match session.current_step() {
            WizardStep::PersonalDetails => run_personal_step(session, input, output)?,
            WizardStep::VehicleDetails => run_vehicle_step(session, input, output)?,
            WizardStep::Coverage => run_coverage_step(session, input, output)?,
            WizardStep::Summary => run_summary_step(session, input, output, branding)?,
        };

        match flow {
            StepFlow::Continue => {}
            StepFlow::Submitted(quote) => return Ok(WizardOutcome::Submitted(quote)),
            StepFlow::Exit => return Ok(WizardOutcome::Exited),
        }
    }
}

fn run_personal_step<P: ProgressStore, R: BufRead, W: Write>(
    session: &mut WizardSession<P>,
    input: &mut R,
    output: &mut W,
) -> io::Result<StepFlow> {
    write_step_header(output, WizardStep::PersonalDetails)?;
    let current = session.state().personal_info.clone();

    let full_name = match prompt_field(input, output, "Full name", current.full_name.as_deref())? {
        Reply::Entered(value) => Some(value),
        Reply::Kept => None,
        Reply::Eof => return Ok(StepFlow::Exit),
    };
    let nrc_passport = match prompt_field(
        input,
        output,
        "NRC or passport number",
        current.nrc_passport.as_deref(),
    )? {
        Reply::Entered(value) => Some(value),
        Reply::Kept => None,
        Reply::Eof => return Ok(StepFlow::Exit),
    };
    let phone_number =
        match prompt_field(input, output, "Phone number", current.phone_number.as_deref())? {
            Reply::Entered(value) => Some(value),
            Reply::Kept => None,
            Reply::Eof => return Ok(StepFlow::Exit),
        };
    let email = match prompt_field(input, output, "Email address", current.email.as_deref())? {
        Reply::Entered(value) => Some(value),
        Reply::Kept => None,
        Reply::Eof => return Ok(StepFlow::Exit),
    };

    let update = PersonalDraft { full_name, nrc_passport, phone_number, email };
    if let Err(error) = session.submit_personal(update) {
        write_validation_errors(output, &error)?;
    }
    Ok(StepFlow::Continue)
}

fn run_vehicle_step<P: ProgressStore, R: BufRead, W: Write>(
    session: &mut WizardSession<P>,
    input: &mut R,
    output: &mut W,
) -> io::Result<StepFlow> {
    write_step_header(output, WizardStep::VehicleDetails)?;
    let current = session.state().vehicle_info.clone();

    let make = match prompt_field(input, output, "Vehicle make", current.make.as_deref())? {
        Reply::Entered(value) => Some(value),
        Reply::Kept => None,
        Reply::Eof => return Ok(StepFlow::Exit),
    };
    let model = match prompt_field(input, output, "Vehicle model", current.model.as_deref())? {
        Reply::Entered(value) => Some(value),
        Reply::Kept => None,
        Reply::Eof => return Ok(StepFlow::Exit),
    };
    let year =
        match prompt_field(input, output, "Year of manufacture", current.year.as_deref())? {
            Reply::Entered(value) => Some(value),
            Reply::Kept => None,
            Reply::Eof => return Ok(StepFlow::Exit),
        };
    let registration_number = match prompt_field(
        input,
        output,
        "Registration number",
        current.registration_number.as_deref(),
    )? {
        Reply::Entered(value) => Some(value),
        Reply::Kept => None,
        Reply::Eof => return Ok(StepFlow::Exit),
    };

    let engine_label = current.engine_type.map(EngineType::label);
    let engine_type = loop {
        match prompt_field(input, output, "Engine type (petrol/diesel)", engine_label)? {
            Reply::Entered(raw) => match raw.parse::<EngineType>() {
                Ok(engine) => break Some(engine),
                Err(error) => writeln!(output, "  {error}")?,
            },
            Reply::Kept => break None,
            Reply::Eof => return Ok(StepFlow::Exit),
        }
    };

    let update = VehicleDraft { make, model, year, registration_number, engine_type };
    if let Err(error) = session.submit_vehicle(update) {
        write_validation_errors(output, &error)?;
    }
    Ok(StepFlow::Continue)
}

fn run_coverage_step<P: ProgressStore, R: BufRead, W: Write>(
    session: &mut WizardSession<P>,
    input: &mut R,
    output: &mut W,
) -> io::Result<StepFlow> {
    write_step_header(output, WizardStep::Coverage)?;
    let current = session.state().coverage_info.clone();

    let coverage_label = current.coverage_type.map(CoverageType::label);
    let coverage_type = loop {
        match prompt_field(
            input,
            output,
            "Coverage type (third-party/comprehensive)",
            coverage_label,
        )? {
            Reply::Entered(raw) => match raw.parse::<CoverageType>() {
                Ok(coverage) => break Some(coverage),
                Err(error) => writeln!(output, "  {error}")?,
            },
            Reply::Kept => break None,
            Reply::Eof => return Ok(StepFlow::Exit),
        }
    };

    let duration_label = current.duration.map(|duration| duration.months().to_string());
    let duration = loop {
        match prompt_field(
            input,
            output,
            "Duration in months (1/3/6/12)",
            duration_label.as_deref(),
        )? {
            Reply::Entered(raw) => match raw.parse::<DurationMonths>() {
                Ok(duration) => break Some(duration),
                Err(error) => writeln!(output, "  {error}")?,
            },
            Reply::Kept => break None,
            Reply::Eof => return Ok(StepFlow::Exit),
        }
    };

    let current_add_ons = current.add_ons.unwrap_or_default();
    let Some(roadside_assistance) = prompt_yes_no(
        input,
        output,
        "Add roadside assistance (K50/month)?",
        current_add_ons.roadside_assistance,
    )?
    else {
        return Ok(StepFlow::Exit);
    };
    let Some(theft_cover) =
        prompt_yes_no(input, output, "Add theft cover (K80/month)?", current_add_ons.theft_cover)?
    else {
        return Ok(StepFlow::Exit);
    };
    let Some(windscreen_cover) = prompt_yes_no(
        input,
        output,
        "Add windscreen cover (K30/month)?",
        current_add_ons.windscreen_cover,
    )?
    else {
        return Ok(StepFlow::Exit);
    };

    let update = CoverageDraft {
        coverage_type,
        duration,
        add_ons: Some(AddOns { roadside_assistance, theft_cover, windscreen_cover }),
    };
    if let Err(error) = session.submit_coverage(update) {
        write_validation_errors(output, &error)?;
    }
    Ok(StepFlow::Continue)
}

fn run_summary_step<P: ProgressStore, R: BufRead, W: Write>(
    session: &mut WizardSession<P>,
    input: &mut R,
    output: &mut W,
    branding: &BrandingConfig,
) -> io::Result<StepFlow> {
    write_step_header(output, WizardStep::Summary)?;
    write_summary(output, session.state(), branding)?;

    loop {
        writeln!(output)?;
        write!(output, "[s]ubmit / [b]ack / [r]estart / [q]uit: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(StepFlow::Exit);
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "s" | "submit" => match session.finalized_quote() {
                Ok(quote) => return Ok(StepFlow::Submitted(quote)),
                Err(error) => writeln!(output, "  {error}")?,
            },
            "b" | "back" => {
                session.back();
                return Ok(StepFlow::Continue);
            }
            "r" | "restart" => {
                session.restart();
                writeln!(output, "Starting over.")?;
                return Ok(StepFlow::Continue);
            }
            "q" | "quit" => return Ok(StepFlow::Exit),
            other => writeln!(output, "  unrecognized choice `{other}`")?,
        }
    }
}

fn write_step_header<W: Write>(output: &mut W, step: WizardStep) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "Step {} of {}: {}", step.index(), STEP_COUNT, step.title())?;
    Ok(())
}

fn write_validation_errors<W: Write>(output: &mut W, error: &WizardError) -> io::Result<()> {
    writeln!(output, "Please fix the following to continue:")?;
    for field_error in error.field_errors() {
        writeln!(output, "  - {}", field_error.message)?;
    }
    Ok(())
}

fn write_summary<W: Write>(
    output: &mut W,
    state: &QuoteState,
    branding: &BrandingConfig,
) -> io::Result<()> {
    let currency = &branding.currency_prefix;

    writeln!(output)?;
    writeln!(output, "Coverage Details")?;
    if let (Some(make), Some(model)) = (&state.vehicle_info.make, &state.vehicle_info.model) {
        let year = state.vehicle_info.year.as_deref().unwrap_or("-");
        writeln!(output, "  Vehicle:             {make} {model} ({year})")?;
    }
    if let Some(registration) = &state.vehicle_info.registration_number {
        writeln!(output, "  Registration:        {registration}")?;
    }
    if let Some(coverage_type) = state.coverage_info.coverage_type {
        writeln!(output, "  Coverage Type:       {}", coverage_type.label())?;
    }
    let months = state.coverage_info.duration.map(DurationMonths::months).unwrap_or(1);
    writeln!(output, "  Duration:            {months} months")?;

    let Some(pricing) = &state.pricing else {
        writeln!(output)?;
        writeln!(output, "Pricing is not available yet.")?;
        return Ok(());
    };

    writeln!(output)?;
    writeln!(output, "Pricing Breakdown")?;
    writeln!(output, "  Base Premium:        {}{:.2}", currency, pricing.base_premium)?;
    if pricing.age_factor > Decimal::ZERO {
        writeln!(output, "  Vehicle Age Factor:  {}{:.2}", currency, pricing.age_factor)?;
    }
    if pricing.roadside_assistance > Decimal::ZERO {
        writeln!(output, "  Roadside Assistance: {}{:.2}", currency, pricing.roadside_assistance)?;
    }
    if pricing.theft_cover > Decimal::ZERO {
        writeln!(output, "  Theft Cover:         {}{:.2}", currency, pricing.theft_cover)?;
    }
    if pricing.windscreen_cover > Decimal::ZERO {
        writeln!(output, "  Windscreen Cover:    {}{:.2}", currency, pricing.windscreen_cover)?;
    }
    writeln!(output, "  Monthly Total:       {}{:.2}", currency, pricing.monthly_total)?;
    writeln!(output, "  Total ({months} months):    {}{:.2}", currency, pricing.total_amount)?;
    Ok(())
}

fn prompt_field<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: Option<&str>,
) -> io::Result<Reply> {
    match current {
        Some(existing) => write!(output, "{label} [{existing}]: ")?,
        None => write!(output, "{label}: ")?,
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Reply::Eof);
    }

    let entered = line.trim();
    if entered.is_empty() {
        Ok(Reply::Kept)
    } else {
        Ok(Reply::Entered(entered.to_string()))
    }
}

/// Yes/no prompt defaulting to the current value. Returns `None` on end of
/// input.
fn prompt_yes_no<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    current: bool,
) -> io::Result<Option<bool>> {
    let hint = if current { "[Y/n]" } else { "[y/N]" };
    loop {
        write!(output, "{label} {hint}: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match line.trim().to_ascii_lowercase().as_str() {
            "" => return Ok(Some(current)),
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            other => writeln!(output, "  unrecognized answer `{other}` (expected y or n)")?,
        }
    }
}
