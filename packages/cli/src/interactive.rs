//! Interactive mode: the three dropdowns, one prompt at a time.
//!
//! Each prompt offers exactly the options the session currently publishes,
//! with their match counts, and dispatches the chosen value as a command.

use dialoguer::Select;
use film_map_filter::FilterSession;
use film_map_filter_models::{Choice, DimensionValue, FilterCommand, OptionList};

use crate::render::popup;

enum Action {
    FilterDate,
    FilterFilm,
    FilterSector,
    ShowLocations,
    Reset,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::FilterDate,
        Self::FilterFilm,
        Self::FilterSector,
        Self::ShowLocations,
        Self::Reset,
        Self::Quit,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::FilterDate => "Filtrar por fecha",
            Self::FilterFilm => "Filtrar por película",
            Self::FilterSector => "Filtrar por sector",
            Self::ShowLocations => "Ver locaciones",
            Self::Reset => "Restablecer filtros",
            Self::Quit => "Salir",
        }
    }
}

/// Runs the prompt loop until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal prompt fails.
pub fn run(session: &mut FilterSession) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let view = session.view();
        println!();
        println!(
            "{} de {} locaciones | fecha: {} | película: {} | sector: {}",
            view.features.len(),
            view.total,
            view.selection.date.label(),
            view.selection.film.label(),
            view.selection.sector.label(),
        );

        let idx = Select::new()
            .with_prompt("¿Qué desea hacer?")
            .items(&labels)
            .default(0)
            .interact()?;

        let command = match Action::ALL[idx] {
            Action::FilterDate => pick(&session.options().dates, &session.selection().date)?
                .map(FilterCommand::SetDate),
            Action::FilterFilm => pick(&session.options().films, &session.selection().film)?
                .map(FilterCommand::SetFilm),
            Action::FilterSector => {
                pick(&session.options().sectors, &session.selection().sector)?
                    .map(FilterCommand::SetSector)
            }
            Action::ShowLocations => {
                for feature in &view.features {
                    println!("{}", popup(feature));
                }
                None
            }
            Action::Reset => Some(FilterCommand::Reset),
            Action::Quit => return Ok(()),
        };

        if let Some(command) = command {
            session.dispatch(&command);
        }
    }
}

/// Prompts for one entry of an option list. `None` if the user backs out.
fn pick<T: DimensionValue>(
    options: &OptionList<T>,
    current: &Choice<T>,
) -> Result<Option<Choice<T>>, dialoguer::Error> {
    let entries = options.entries();
    let items: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({})", e.label, e.count))
        .collect();
    let default = entries.iter().position(|e| &e.value == current).unwrap_or(0);

    let picked = Select::new()
        .items(&items)
        .default(default)
        .interact_opt()?;

    Ok(picked.map(|i| entries[i].value.clone()))
}
