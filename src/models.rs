use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub school: SchoolConfig,
    pub activities: Vec<ActivitySeed>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            school: SchoolConfig::default(),
            activities: default_activities(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8000".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SchoolConfig {
    pub name: String,
    pub timezone: String,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            name: "Mergington High School".to_string(),
            timezone: "America/New_York".to_string(),
        }
    }
}

/// One entry of the seed set a roster is built from.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ActivitySeed {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

/// An activity as stored in the roster and as sent over the wire.
///
/// The name is the roster key, so it is not part of the serialized record.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Activity {
    #[serde(skip)]
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    pub participants: Vec<String>,
}

impl Activity {
    pub fn spots_left(&self) -> u32 {
        let taken = u32::try_from(self.participants.len()).unwrap_or(u32::MAX);
        self.max_participants.saturating_sub(taken)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}

fn seed(
    name: &str,
    description: &str,
    schedule: &str,
    max_participants: u32,
    participants: &[&str],
) -> ActivitySeed {
    ActivitySeed {
        name: name.to_string(),
        description: description.to_string(),
        schedule: schedule.to_string(),
        max_participants,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    }
}

/// The activities offered at Mergington High School when no config overrides them.
pub fn default_activities() -> Vec<ActivitySeed> {
    vec![
        seed(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            &["michael@mergington.edu", "daniel@mergington.edu"],
        ),
        seed(
            "Programming Class",
            "Learn programming fundamentals and build software projects",
            "Tuesdays and Thursdays, 3:30 PM - 4:30 PM",
            20,
            &["emma@mergington.edu", "sophia@mergington.edu"],
        ),
        seed(
            "Gym Class",
            "Physical education and sports activities",
            "Mondays, Wednesdays, Fridays, 2:00 PM - 3:00 PM",
            30,
            &["john@mergington.edu", "olivia@mergington.edu"],
        ),
        seed(
            "Basketball Team",
            "Competitive basketball training and matches",
            "Mondays and Thursdays, 4:00 PM - 5:30 PM",
            15,
            &["alex@mergington.edu"],
        ),
        seed(
            "Tennis Club",
            "Tennis lessons and friendly competitions",
            "Tuesdays and Saturdays, 3:00 PM - 4:30 PM",
            10,
            &["lucas@mergington.edu", "isabella@mergington.edu"],
        ),
        seed(
            "Drama Club",
            "Theater performances and acting workshops",
            "Wednesdays, 3:30 PM - 5:00 PM",
            25,
            &["maria@mergington.edu"],
        ),
        seed(
            "Art Studio",
            "Painting, drawing, and sculpture techniques",
            "Mondays and Fridays, 3:30 PM - 4:30 PM",
            18,
            &["anna@mergington.edu", "luis@mergington.edu"],
        ),
        seed(
            "Debate Team",
            "Develop argumentation skills and compete in debates",
            "Thursdays, 3:30 PM - 4:45 PM",
            16,
            &["carlos@mergington.edu"],
        ),
        seed(
            "Science Club",
            "Explore STEM projects and conduct experiments",
            "Tuesdays, 4:00 PM - 5:00 PM",
            22,
            &["sara@mergington.edu", "pablo@mergington.edu"],
        ),
    ]
}
