//! Multi-step profile wizard shown after registration.
//!
//! Steps run Welcome, Gender, Age, Weight, Height, Goal, ActivityLevel and
//! finally Complete. Choice steps advance on selection; numeric steps wait for
//! an explicit [`ProfileSetup::advance`].

use serde::Serialize;
use thiserror::Error;

use crate::preferences::{UserPreferences, UserProfile};
use crate::store::StoreError;

/// Number of steps counted by the progress bar. The Complete step sits past it.
pub const TOTAL_STEPS: u8 = 7;

pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 18..=60;
pub const HEIGHT_RANGE_CM: std::ops::RangeInclusive<u32> = 155..=190;

const LB_PER_KG: f64 = 2.204_62;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SetupStep {
    Welcome = 1,
    Gender,
    Age,
    Weight,
    Height,
    Goal,
    ActivityLevel,
    Complete,
}

impl SetupStep {
    const ORDER: [SetupStep; 8] = [
        SetupStep::Welcome,
        SetupStep::Gender,
        SetupStep::Age,
        SetupStep::Weight,
        SetupStep::Height,
        SetupStep::Goal,
        SetupStep::ActivityLevel,
        SetupStep::Complete,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ORDER.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number().checked_sub(1)?)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn range(self) -> std::ops::RangeInclusive<u32> {
        match self {
            WeightUnit::Kg => 40..=150,
            WeightUnit::Lb => 88..=330,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Goal {
    #[default]
    LoseWeight,
    ImproveLifestyle,
    GainMuscle,
    ShapeBody,
    Other,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::LoseWeight,
        Goal::ImproveLifestyle,
        Goal::GainMuscle,
        Goal::ShapeBody,
        Goal::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Goal::LoseWeight => "Lose Weight",
            Goal::ImproveLifestyle => "Improve Lifestyle",
            Goal::GainMuscle => "Gain Muscle Mass",
            Goal::ShapeBody => "Shape The Body",
            Goal::Other => "Other",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ActivityLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub full_name: String,
    pub nickname: String,
    pub email: String,
    pub mobile: String,
}

#[derive(Debug, Error)]
pub enum ProfileSetupError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },
    #[error("expected the {expected:?} step, wizard is on {actual:?}")]
    WrongStep {
        expected: SetupStep,
        actual: SetupStep,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Moved(SetupStep),
    Stay,
    /// Back was pressed on the first step; the caller leaves the wizard.
    Exit,
}

fn check_range(
    field: &'static str,
    value: u32,
    range: std::ops::RangeInclusive<u32>,
) -> Result<u32, ProfileSetupError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ProfileSetupError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

#[derive(Clone, Debug)]
pub struct ProfileSetup {
    step: SetupStep,
    gender: Gender,
    age: u32,
    weight: u32,
    weight_unit: WeightUnit,
    height_cm: u32,
    goal: Goal,
    activity_level: ActivityLevel,
    contact: ContactDetails,
}

impl Default for ProfileSetup {
    fn default() -> Self {
        Self {
            step: SetupStep::Welcome,
            gender: Gender::default(),
            age: 27,
            weight: 75,
            weight_unit: WeightUnit::Kg,
            height_cm: 165,
            goal: Goal::default(),
            activity_level: ActivityLevel::default(),
            contact: ContactDetails::default(),
        }
    }
}

impl ProfileSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the wizard pre-filled with the stored email and gender.
    pub fn with_stored(profile: &UserProfile) -> Self {
        let mut setup = Self::default();
        setup.contact.email = profile.email.clone();
        if let Some(g) = Gender::parse(&profile.gender) {
            setup.gender = g;
        }
        setup
    }

    pub fn step(&self) -> SetupStep {
        self.step
    }

    pub fn progress(&self) -> f32 {
        f32::from(self.step.number()) / f32::from(TOTAL_STEPS + 1)
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn weight(&self) -> (u32, WeightUnit) {
        (self.weight, self.weight_unit)
    }

    pub fn height_cm(&self) -> u32 {
        self.height_cm
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    fn require(&self, expected: SetupStep) -> Result<(), ProfileSetupError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(ProfileSetupError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    fn move_to(&mut self, step: SetupStep) -> Navigation {
        tracing::trace!(from = ?self.step, to = ?step, "profile setup step");
        self.step = step;
        Navigation::Moved(step)
    }

    pub fn back(&mut self) -> Navigation {
        match self.step.previous() {
            Some(prev) => self.move_to(prev),
            None => Navigation::Exit,
        }
    }

    /// The "continue" button. The Complete step finishes through
    /// [`ProfileSetup::complete`] instead.
    pub fn advance(&mut self) -> Navigation {
        match (self.step, self.step.next()) {
            (SetupStep::Complete, _) | (_, None) => Navigation::Stay,
            (_, Some(next)) => self.move_to(next),
        }
    }

    pub fn select_gender(&mut self, gender: Gender) -> Result<Navigation, ProfileSetupError> {
        self.require(SetupStep::Gender)?;
        self.gender = gender;
        Ok(self.move_to(SetupStep::Age))
    }

    pub fn set_age(&mut self, age: u32) -> Result<(), ProfileSetupError> {
        self.age = check_range("age", age, AGE_RANGE)?;
        Ok(())
    }

    pub fn set_weight(&mut self, weight: u32) -> Result<(), ProfileSetupError> {
        self.weight = check_range("weight", weight, self.weight_unit.range())?;
        Ok(())
    }

    /// Switch between kilograms and pounds, converting the current value.
    pub fn toggle_weight_unit(&mut self) -> WeightUnit {
        let (unit, converted) = match self.weight_unit {
            WeightUnit::Kg => (WeightUnit::Lb, f64::from(self.weight) * LB_PER_KG),
            WeightUnit::Lb => (WeightUnit::Kg, f64::from(self.weight) / LB_PER_KG),
        };
        let range = unit.range();
        self.weight = (converted.round() as u32).clamp(*range.start(), *range.end());
        self.weight_unit = unit;
        unit
    }

    pub fn set_height(&mut self, height_cm: u32) -> Result<(), ProfileSetupError> {
        self.height_cm = check_range("height", height_cm, HEIGHT_RANGE_CM)?;
        Ok(())
    }

    pub fn select_goal(&mut self, goal: Goal) -> Result<Navigation, ProfileSetupError> {
        self.require(SetupStep::Goal)?;
        self.goal = goal;
        Ok(self.move_to(SetupStep::ActivityLevel))
    }

    pub fn select_activity_level(
        &mut self,
        level: ActivityLevel,
    ) -> Result<Navigation, ProfileSetupError> {
        self.require(SetupStep::ActivityLevel)?;
        self.activity_level = level;
        Ok(self.move_to(SetupStep::Complete))
    }

    pub fn set_contact(&mut self, contact: ContactDetails) {
        self.contact = contact;
    }

    /// Persist name, an empty bio and the gender as one batch, then the email.
    pub async fn complete(&self, prefs: &UserPreferences) -> Result<(), ProfileSetupError> {
        self.require(SetupStep::Complete)?;
        prefs
            .save_profile(&self.contact.full_name, "", Some(self.gender.as_str()))
            .await?;
        prefs.save_email(&self.contact.email).await?;
        tracing::info!(gender = self.gender.as_str(), "profile setup completed");
        Ok(())
    }
}
