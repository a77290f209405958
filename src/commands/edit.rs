use anyhow::{Context, Result};
use carecal_core::{
    Event, EventDraft, EventInput, EventKind, Frequency, MedicationTemplate, ProfileId,
};
use owo_colors::OwoColorize;

use super::Session;
use crate::render::pluralize;
use crate::utils::parse::{parse_date, parse_days, parse_time, split_times};

pub struct EditArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub kind: Option<EventKind>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub profile: Option<String>,
    pub start: Option<String>,
    pub duration: Option<String>,
    pub times: Option<String>,
    pub frequency: Option<Frequency>,
    pub only_this: bool,
}

impl EditArgs {
    fn touches_single_fields(&self) -> bool {
        self.date.is_some() || self.time.is_some() || self.kind.is_some()
    }

    fn touches_schedule_fields(&self) -> bool {
        self.start.is_some()
            || self.duration.is_some()
            || self.times.is_some()
            || self.frequency.is_some()
    }
}

pub fn run(id_arg: &str, args: EditArgs) -> Result<()> {
    let mut session = Session::load()?;
    let id = session.event_id(id_arg)?;
    let event = session
        .store
        .get(&id)
        .cloned()
        .with_context(|| format!("Event '{}' not found", id))?;

    if args.only_this && !event.is_recurring() {
        anyhow::bail!("--only-this only applies to medication reminders");
    }

    // Some(None) means "unassign"
    let profile_id = match args.profile.as_deref() {
        Some(p) => Some(session.profile_id(p)?),
        None => None,
    };

    let series = event.parent_id().cloned().filter(|_| !args.only_this);

    let input: EventInput = if let Some(parent_id) = series {
        if args.touches_single_fields() {
            anyhow::bail!(
                "--date, --time and --kind change a single reminder. \
                Use --start/--times to change the schedule, or add --only-this"
            );
        }
        let mut template = session
            .store
            .template_for(&parent_id)
            .with_context(|| format!("Medication schedule '{}' not found", parent_id))?;
        apply_schedule_args(&mut template, &args, profile_id)?;
        template.into()
    } else if args.times.is_some() {
        if args.only_this {
            anyhow::bail!("--times changes the whole schedule and can't be combined with --only-this");
        }
        let mut template = schedule_from_event(&event);
        apply_schedule_args(&mut template, &args, profile_id)?;
        template.into()
    } else {
        if args.touches_schedule_fields() {
            anyhow::bail!("--start, --for and --frequency only apply to medication schedules");
        }
        let mut draft = EventDraft::from_event(&event);
        apply_single_args(&mut draft, &args, profile_id)?;
        draft.into()
    };

    let is_schedule = matches!(input, EventInput::Recurring(_));
    let snapshot = session.store.save(input, Some(&id), &session.profiles)?;
    session.save_events(&snapshot)?;

    // Regenerated occurrences are appended at the end of the snapshot
    let new_lineage = snapshot.last().and_then(|e| e.parent_id().cloned());

    if let (true, Some(parent_id)) = (is_schedule, new_lineage) {
        let count = session.store.lineage(&parent_id).len();
        println!(
            "{}",
            format!(
                "  Updated schedule: {} ({} {})",
                event.title,
                count,
                pluralize("reminder", count)
            )
            .green()
        );
    } else {
        println!("{}", format!("  Updated: {}", id).green());
    }

    Ok(())
}

fn apply_single_args(
    draft: &mut EventDraft,
    args: &EditArgs,
    profile_id: Option<Option<ProfileId>>,
) -> Result<()> {
    if let Some(title) = &args.title {
        draft.title = title.clone();
    }
    if let Some(date) = &args.date {
        draft.date = Some(parse_date(date)?);
    }
    if let Some(time) = &args.time {
        draft.time = Some(parse_time(time)?);
    }
    if let Some(kind) = args.kind {
        draft.kind = kind;
    }
    if let Some(location) = &args.location {
        draft.location = Some(location.clone());
    }
    if let Some(description) = &args.description {
        draft.description = Some(description.clone());
    }
    if let Some(profile_id) = profile_id {
        draft.profile_id = profile_id;
    }
    Ok(())
}

fn apply_schedule_args(
    template: &mut MedicationTemplate,
    args: &EditArgs,
    profile_id: Option<Option<ProfileId>>,
) -> Result<()> {
    if let Some(title) = &args.title {
        template.title = title.clone();
    }
    if let Some(start) = &args.start {
        template.start_date = Some(parse_date(start)?);
    }
    if let Some(duration) = &args.duration {
        template.duration_days = parse_days(duration)?;
    }
    if let Some(times) = &args.times {
        template.times = split_times(times);
    }
    if let Some(frequency) = args.frequency {
        template.frequency = frequency;
    }
    if let Some(location) = &args.location {
        template.location = Some(location.clone());
    }
    if let Some(description) = &args.description {
        template.description = Some(description.clone());
    }
    if let Some(profile_id) = profile_id {
        template.profile_id = profile_id;
    }
    Ok(())
}

/// Starting point for turning a one-off event into a medication schedule.
fn schedule_from_event(event: &Event) -> MedicationTemplate {
    MedicationTemplate {
        title: event.title.clone(),
        start_date: Some(event.date),
        times: vec![event.time.to_string()],
        location: event.location.clone(),
        description: event.description.clone(),
        profile_id: event.profile_id.clone(),
        ..Default::default()
    }
}
