//! Campaign draft form for the "Start a Campaign" page

use alloy_primitives::utils::{format_ether, parse_ether};
use alloy_primitives::U256;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::{Action, Module, NotifyLevel, Route};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("goal {0:?} is not an ETH amount")]
    InvalidGoal(String),
    #[error("goal must be greater than zero")]
    ZeroGoal,
    #[error("end date {0:?} is not YYYY-MM-DD")]
    InvalidDeadline(String),
    #[error("end date {deadline} must be after {today}")]
    PastDeadline { deadline: NaiveDate, today: NaiveDate },
    #[error("image must be an http(s) URL")]
    InvalidImage,
}

/// A validated campaign, kept locally for the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDraft {
    pub name: String,
    pub title: String,
    pub description: String,
    /// Goal in wei
    pub target: U256,
    pub deadline: NaiveDate,
    pub image: String,
}

impl CampaignDraft {
    pub fn target_eth(&self) -> String {
        format_ether(self.target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Title,
    Story,
    Goal,
    EndDate,
    Image,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Title,
        Field::Story,
        Field::Goal,
        Field::EndDate,
        Field::Image,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Your Name",
            Field::Title => "Campaign Title",
            Field::Story => "Story",
            Field::Goal => "Goal (ETH)",
            Field::EndDate => "End Date",
            Field::Image => "Campaign image",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Name => "John Doe",
            Field::Title => "Write a title",
            Field::Story => "Write your story",
            Field::Goal => "0.50",
            Field::EndDate => "YYYY-MM-DD",
            Field::Image => "https://…",
        }
    }
}

/// Raw text of the form fields plus the focused field
#[derive(Debug, Clone, Default)]
pub struct CampaignForm {
    values: [String; 6],
    focus: usize,
    submitted: Option<CampaignDraft>,
}

impl CampaignForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[Self::index(field)]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[Self::index(field)] = value.into();
    }

    pub fn focused(&self) -> Field {
        Field::ALL[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Field::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Most recent valid draft, taken once by the app
    pub fn take_submitted(&mut self) -> Option<CampaignDraft> {
        self.submitted.take()
    }

    pub fn validate(&self, today: NaiveDate) -> Result<CampaignDraft, DraftError> {
        let text = |field: Field| -> Result<String, DraftError> {
            let value = self.value(field).trim();
            if value.is_empty() {
                return Err(DraftError::Missing(field.label()));
            }
            Ok(value.to_string())
        };

        let name = text(Field::Name)?;
        let title = text(Field::Title)?;
        let description = text(Field::Story)?;

        let goal = text(Field::Goal)?;
        let target = parse_ether(&goal).map_err(|_| DraftError::InvalidGoal(goal.clone()))?;
        if target.is_zero() {
            return Err(DraftError::ZeroGoal);
        }

        let end = text(Field::EndDate)?;
        let deadline = NaiveDate::parse_from_str(&end, "%Y-%m-%d")
            .map_err(|_| DraftError::InvalidDeadline(end.clone()))?;
        if deadline <= today {
            return Err(DraftError::PastDeadline { deadline, today });
        }

        let image = text(Field::Image)?;
        if !(image.starts_with("https://") || image.starts_with("http://")) {
            return Err(DraftError::InvalidImage);
        }

        Ok(CampaignDraft {
            name,
            title,
            description,
            target,
            deadline,
            image,
        })
    }

    fn submit(&mut self) -> Action {
        let today = chrono::Local::now().date_naive();
        match self.validate(today) {
            Ok(draft) => {
                tracing::info!(title = %draft.title, goal = %draft.target_eth(), "campaign draft saved");
                self.values = Default::default();
                self.focus = 0;
                self.submitted = Some(draft);
                Action::Navigate(Route::profile())
            }
            Err(err) => Action::Notify(err.to_string(), NotifyLevel::Warn),
        }
    }

    fn index(field: Field) -> usize {
        Field::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default()
    }
}

impl Module for CampaignForm {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                Action::None
            }
            KeyCode::Enter => {
                if self.focus + 1 == Field::ALL.len() {
                    self.submit()
                } else {
                    self.focus_next();
                    Action::None
                }
            }
            KeyCode::Backspace => {
                self.values[self.focus].pop();
                Action::None
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.values[self.focus].push(ch);
                Action::None
            }
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn filled() -> CampaignForm {
        let mut form = CampaignForm::new();
        form.set(Field::Name, "Ada");
        form.set(Field::Title, "Community garden");
        form.set(Field::Story, "Seeds and soil");
        form.set(Field::Goal, "1.5");
        form.set(Field::EndDate, "2024-04-01");
        form.set(Field::Image, "https://example.com/garden.png");
        form
    }

    #[test]
    fn test_valid_draft() {
        let draft = filled().validate(today()).unwrap();
        assert_eq!(draft.target, U256::from(1_500_000_000_000_000_000u64));
        assert_eq!(draft.target_eth(), "1.500000000000000000");
        assert_eq!(draft.deadline, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn test_missing_and_bad_fields() {
        let mut form = filled();
        form.set(Field::Title, "   ");
        assert_eq!(
            form.validate(today()),
            Err(DraftError::Missing("Campaign Title"))
        );

        let mut form = filled();
        form.set(Field::Goal, "lots");
        assert_eq!(
            form.validate(today()),
            Err(DraftError::InvalidGoal("lots".to_string()))
        );

        let mut form = filled();
        form.set(Field::Goal, "0");
        assert_eq!(form.validate(today()), Err(DraftError::ZeroGoal));

        let mut form = filled();
        form.set(Field::EndDate, "01/04/2024");
        assert!(matches!(
            form.validate(today()),
            Err(DraftError::InvalidDeadline(_))
        ));

        let mut form = filled();
        form.set(Field::EndDate, "2024-03-01");
        assert!(matches!(
            form.validate(today()),
            Err(DraftError::PastDeadline { .. })
        ));

        let mut form = filled();
        form.set(Field::Image, "garden.png");
        assert_eq!(form.validate(today()), Err(DraftError::InvalidImage));
    }

    #[test]
    fn test_typing_and_focus() {
        let mut form = CampaignForm::new();
        for ch in "Bob".chars() {
            form.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        form.handle_key(KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(form.value(Field::Name), "Bo");

        form.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(form.focused(), Field::Title);
        form.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        form.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(form.focused(), Field::Image);
    }

    #[test]
    fn test_submit_incomplete_form_warns() {
        let mut form = CampaignForm::new();
        for _ in 0..5 {
            form.focus_next();
        }
        let action = form.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(
            action,
            Action::Notify("Your Name is required".to_string(), NotifyLevel::Warn)
        );
        assert!(form.take_submitted().is_none());
    }
}
