//! The interactive search loop.
//!
//! Each round walks query → location choice → weather → radius → places and
//! finally asks whether to go again. A failed location, weather or places
//! lookup ends the session with [`SessionError::Resolve`]; deciding what that
//! means for the process is left to the caller.

use std::{cell::RefCell, io::Write};

use thiserror::Error;
use tracing::{debug, info, warn};
use travel_core::{LocationProvider, PlacesProvider, ResolveError, WeatherProvider, fetch_details};

use crate::{prompt::Prompter, render};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Error while getting {what} from api")]
    Resolve {
        what: &'static str,
        #[source]
        source: ResolveError,
    },

    #[error("location #{index} is not among the {count} results")]
    InvalidChoice { index: usize, count: usize },

    #[error(transparent)]
    Prompt(#[from] anyhow::Error),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn resolve_failed(what: &'static str) -> impl FnOnce(ResolveError) -> SessionError {
    move |source| SessionError::Resolve { what, source }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub language: String,
    pub default_radius: u32,
}

pub struct Session<'a, P, W> {
    locations: &'a dyn LocationProvider,
    weather: &'a dyn WeatherProvider,
    places: &'a dyn PlacesProvider,
    prompter: P,
    out: W,
    settings: Settings,
}

impl<'a, P: Prompter, W: Write> Session<'a, P, W> {
    pub fn new(
        locations: &'a dyn LocationProvider,
        weather: &'a dyn WeatherProvider,
        places: &'a dyn PlacesProvider,
        prompter: P,
        out: W,
        settings: Settings,
    ) -> Self {
        Self { locations, weather, places, prompter, out, settings }
    }

    /// Run rounds until the user declines another one.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        loop {
            self.round().await?;

            if !self.prompter.search_again()? {
                return Ok(());
            }
        }
    }

    async fn round(&mut self) -> Result<(), SessionError> {
        let query = self.prompter.query()?;
        info!(%query, "searching locations");

        let hits = self.locations.locations(&query).await.map_err(resolve_failed("locations"))?;

        writeln!(self.out)?;
        writeln!(self.out, "{}", render::rule("Searching results"))?;
        if hits.is_empty() {
            writeln!(self.out, "Nothing found for \"{query}\"")?;
            return Ok(());
        }
        for (index, hit) in hits.iter().enumerate() {
            writeln!(self.out, "{}", render::location(index, hit))?;
        }
        self.out.flush()?;

        let index = self.prompter.choose_location(hits.len())?;
        let hit = hits
            .get(index)
            .ok_or(SessionError::InvalidChoice { index, count: hits.len() })?;
        let point = hit.point;
        debug!(name = %hit.name, lat = point.lat, lng = point.lng, "location chosen");

        let snapshot =
            self.weather.weather(point).await.map_err(resolve_failed("weather info"))?;
        writeln!(self.out, "{}", render::weather(&snapshot))?;
        self.out.flush()?;

        let radius = self.prompter.radius(self.settings.default_radius)?;
        let summaries = self
            .places
            .places(point, radius, &self.settings.language)
            .await
            .map_err(resolve_failed("places"))?;

        writeln!(self.out, "{}", render::rule("Searching results"))?;

        let out = RefCell::new(&mut self.out);
        let report = fetch_details(self.places, &summaries, &self.settings.language, |detail| {
            let mut out = out.borrow_mut();
            let printed = writeln!(out, "{}", render::place(&detail)).and_then(|()| out.flush());
            if let Err(e) = printed {
                warn!(xid = %detail.xid, error = %e, "failed to print place");
            }
            async {}
        })
        .await;
        debug!(
            requested = report.requested,
            rendered = report.rendered,
            dropped = report.dropped(),
            "places rendered"
        );

        Ok(())
    }
}
