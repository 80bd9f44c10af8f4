use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::filter::non_empty;
use crate::models::{FilterSelection, SalaryRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Dashboard,
    Analytics,
    Skill,
    Resume,
    About,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Dashboard,
        Tab::Analytics,
        Tab::Skill,
        Tab::Resume,
        Tab::About,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Analytics => "analytics",
            Tab::Skill => "skill",
            Tab::Resume => "resume",
            Tab::About => "about",
        }
    }
}

impl std::fmt::Display for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tab::Dashboard => write!(f, "Dashboard"),
            Tab::Analytics => write!(f, "Analytics"),
            Tab::Skill => write!(f, "Skill Match"),
            Tab::Resume => write!(f, "Resume Matcher"),
            Tab::About => write!(f, "About"),
        }
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase();
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == id)
            .ok_or_else(|| Error::UnknownTab(s.to_string()))
    }
}

/// Everything the user has chosen. Replaced wholesale by `reduce`, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub tab: Tab,
    pub selection: FilterSelection,
    /// 1-based.
    pub page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            tab: Tab::Dashboard,
            selection: FilterSelection::default(),
            page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectTab(Tab),
    SetSkills(Vec<String>),
    SetLocation(Option<String>),
    SetExperience(Option<String>),
    SetSalaryRange(Option<SalaryRange>),
    ClearFilters,
    NextPage,
    PreviousPage,
    GoToPage(usize),
    /// A resume upload resolved with these skills.
    ResumeMatched(Vec<String>),
}

/// Pure transition. `total_pages` describes the result the current state is
/// showing and only bounds page navigation.
pub fn reduce(state: &ViewState, action: &Action, total_pages: usize) -> ViewState {
    let last_page = total_pages.max(1);
    let mut next = state.clone();

    match action {
        Action::SelectTab(tab) => next.tab = *tab,
        Action::SetSkills(skills) => next.selection.skills = skills.clone(),
        Action::SetLocation(location) => next.selection.location = non_empty(location.clone()),
        Action::SetExperience(experience) => {
            next.selection.experience = non_empty(experience.clone())
        }
        Action::SetSalaryRange(range) => next.selection.salary_range = *range,
        Action::ClearFilters => next.selection = FilterSelection::default(),
        Action::NextPage => next.page = (state.page + 1).min(last_page),
        Action::PreviousPage => next.page = state.page.saturating_sub(1).max(1),
        Action::GoToPage(page) => next.page = (*page).clamp(1, last_page),
        Action::ResumeMatched(skills) => {
            next.selection = FilterSelection::with_skills(skills.iter().cloned());
            next.tab = Tab::Skill;
        }
    }

    if next.selection != state.selection {
        next.page = 1;
    }

    next
}
