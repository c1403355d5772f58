use anyhow::Result;
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode, Text, validator::Validation};
use travel_core::ServiceId;

/// Everything the session asks the user.
pub trait Prompter {
    fn query(&mut self) -> Result<String>;

    /// Index into a list of `count` locations.
    fn choose_location(&mut self, count: usize) -> Result<usize>;

    fn radius(&mut self, default: u32) -> Result<u32>;

    fn search_again(&mut self) -> Result<bool>;
}

/// Terminal prompts backed by `inquire`.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn query(&mut self) -> Result<String> {
        let query = Text::new("Enter query")
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(Validation::Invalid("Query must not be empty".into()))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt()?;

        Ok(query.trim().to_string())
    }

    fn choose_location(&mut self, count: usize) -> Result<usize> {
        let index = CustomType::<usize>::new("Choose location")
            .with_default(0)
            .with_error_message("Please type a location number")
            .with_validator(move |index: &usize| {
                if *index < count {
                    Ok(Validation::Valid)
                } else {
                    let last = count.saturating_sub(1);
                    Ok(Validation::Invalid(format!("Pick a number from 0 to {last}").into()))
                }
            })
            .prompt()?;

        Ok(index)
    }

    fn radius(&mut self, default: u32) -> Result<u32> {
        let radius = CustomType::<u32>::new("Enter places searching radius")
            .with_default(default)
            .with_help_message("meters")
            .with_error_message("Please type a whole number of meters")
            .prompt()?;

        Ok(radius)
    }

    fn search_again(&mut self) -> Result<bool> {
        Ok(Confirm::new("Search one more?").with_default(false).prompt()?)
    }
}

/// Ask for the API key of `service` without echoing it.
pub fn api_key(service: ServiceId) -> Result<String> {
    let key = Password::new(&format!("API key for {service}"))
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("API key must not be empty".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()?;

    Ok(key.trim().to_string())
}
