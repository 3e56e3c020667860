use axum::http::StatusCode;
use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

use crate::models::{Activity, ActivitySeed};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Activity not found")]
    NotFound,

    #[error("Student already signed up for this activity")]
    AlreadySignedUp,

    #[error("Student not signed up for this activity")]
    NotSignedUp,

    #[error("Duplicate activity in seed: {0}")]
    DuplicateActivity(String),

    #[error("Duplicate participant {email} in seed for {activity}")]
    DuplicateParticipant { activity: String, email: String },

    #[error("Activity {0} must allow at least one participant")]
    InvalidCapacity(String),
}

impl RosterError {
    /// HTTP status the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            RosterError::NotFound => StatusCode::NOT_FOUND,
            RosterError::AlreadySignedUp | RosterError::NotSignedUp => StatusCode::BAD_REQUEST,
            RosterError::DuplicateActivity(_)
            | RosterError::DuplicateParticipant { .. }
            | RosterError::InvalidCapacity(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Canonical form of an email: surrounding whitespace removed, lower-cased.
///
/// The ASCII file/group/record/unit separators count as whitespace here too.
pub fn normalize_email(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
        .to_lowercase()
}

/// In-memory collection of all activities, kept in seed order.
#[derive(Debug, Clone)]
pub struct Roster {
    activities: Vec<Activity>,
}

impl Roster {
    pub fn from_seed(seed: &[ActivitySeed]) -> Result<Self, RosterError> {
        let mut activities: Vec<Activity> = Vec::with_capacity(seed.len());

        for s in seed {
            if activities.iter().any(|a| a.name == s.name) {
                return Err(RosterError::DuplicateActivity(s.name.clone()));
            }
            if s.max_participants == 0 {
                return Err(RosterError::InvalidCapacity(s.name.clone()));
            }

            let mut participants: Vec<String> = Vec::with_capacity(s.participants.len());
            for p in &s.participants {
                let email = normalize_email(p);
                if participants.contains(&email) {
                    return Err(RosterError::DuplicateParticipant {
                        activity: s.name.clone(),
                        email,
                    });
                }
                participants.push(email);
            }

            activities.push(Activity {
                name: s.name.clone(),
                description: s.description.clone(),
                schedule: s.schedule.clone(),
                max_participants: s.max_participants,
                participants,
            });
        }

        Ok(Self { activities })
    }

    pub fn list_activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn get(&self, activity_name: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.name == activity_name)
    }

    fn get_mut(&mut self, activity_name: &str) -> Result<&mut Activity, RosterError> {
        self.activities
            .iter_mut()
            .find(|a| a.name == activity_name)
            .ok_or(RosterError::NotFound)
    }

    pub fn sign_up(&mut self, activity_name: &str, email: &str) -> Result<String, RosterError> {
        let activity = self.get_mut(activity_name)?;
        let email = normalize_email(email);

        if activity
            .participants
            .iter()
            .any(|p| normalize_email(p) == email)
        {
            return Err(RosterError::AlreadySignedUp);
        }

        // max_participants is advisory, signup never checks it
        let message = format!("Signed up {email} for {activity_name}");
        activity.participants.push(email);
        Ok(message)
    }

    pub fn withdraw(&mut self, activity_name: &str, email: &str) -> Result<String, RosterError> {
        let activity = self.get_mut(activity_name)?;
        let email = normalize_email(email);

        let pos = activity
            .participants
            .iter()
            .position(|p| normalize_email(p) == email)
            .ok_or(RosterError::NotSignedUp)?;

        activity.participants.remove(pos);
        Ok(format!("Removed {email} from {activity_name}"))
    }
}

impl Serialize for Roster {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.activities.len()))?;
        for activity in &self.activities {
            map.serialize_entry(&activity.name, activity)?;
        }
        map.end()
    }
}
