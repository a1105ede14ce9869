//! Discoverable events and active challenges

use serde::{Deserialize, Serialize};

/// An event listed in the discovery feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventListing {
    /// Event identifier (membership key)
    pub id: String,
    /// Display title
    pub title: String,
    /// Activity kind ("Running", "Yoga", ...)
    pub kind: String,
    /// Meeting place
    pub location: String,
    /// Date as shown to users
    pub date: String,
    /// Participants registered before the current user
    pub participants: u32,
    /// Capacity
    pub max_participants: u32,
    /// Difficulty label
    pub difficulty: String,
}

impl EventListing {
    /// Whether there is no room left for a new participant
    pub fn is_full(&self) -> bool {
        self.participants >= self.max_participants
    }

    /// Spots remaining, counting the current user when they have joined
    pub fn spots_left(&self, joined: bool) -> u32 {
        self.max_participants
            .saturating_sub(self.participants)
            .saturating_sub(u32::from(joined))
    }
}

/// A challenge users can opt into
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    /// Title, also the membership key
    pub title: String,
    /// Number of participants
    pub participants: u32,
    /// Days until the challenge closes
    pub days_left: u32,
    /// Completion fraction in `0.0..=1.0`
    pub progress: f32,
}

impl Challenge {
    pub fn percent_complete(&self) -> u32 {
        (self.progress.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

/// The built-in discovery feed
pub fn default_events() -> Vec<EventListing> {
    [
        (
            "1",
            "Belgrad Forest Trekking",
            "Trekking",
            "Sarıyer, Istanbul",
            "08 Jan 2026",
            24,
            30,
            "Moderate",
        ),
        (
            "2",
            "Morning Run – Bosphorus",
            "Running",
            "Beşiktaş, Istanbul",
            "15 Jan 2026",
            18,
            25,
            "Easy",
        ),
        (
            "3",
            "Manisa Running Friends",
            "Running",
            "Manisa City Park",
            "20 Jan 2026",
            41,
            50,
            "Easy–Medium",
        ),
        (
            "4",
            "Cycling – Princes Islands",
            "Cycling",
            "Büyükada, Istanbul",
            "22 Jan 2026",
            12,
            20,
            "Moderate",
        ),
        (
            "5",
            "Yoga in the Park",
            "Yoga",
            "Gülhane Park, Istanbul",
            "25 Jan 2026",
            15,
            20,
            "Beginner",
        ),
    ]
    .into_iter()
    .map(
        |(id, title, kind, location, date, participants, max_participants, difficulty)| {
            EventListing {
                id: id.to_string(),
                title: title.to_string(),
                kind: kind.to_string(),
                location: location.to_string(),
                date: date.to_string(),
                participants,
                max_participants,
                difficulty: difficulty.to_string(),
            }
        },
    )
    .collect()
}

/// The built-in active challenges
pub fn default_challenges() -> Vec<Challenge> {
    [
        ("30-Day Running Streak", 1240, 14, 0.5),
        ("Weekly 50km Goal", 890, 3, 0.72),
        ("Daily 10K Steps", 2100, 7, 0.35),
    ]
    .into_iter()
    .map(|(title, participants, days_left, progress)| Challenge {
        title: title.to_string(),
        participants,
        days_left,
        progress,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(participants: u32, max_participants: u32) -> EventListing {
        EventListing {
            id: "x".to_string(),
            title: "Test Event".to_string(),
            kind: "Running".to_string(),
            location: "Somewhere".to_string(),
            date: "01 Jan 2026".to_string(),
            participants,
            max_participants,
            difficulty: "Easy".to_string(),
        }
    }

    #[test]
    fn test_spots_left_counts_current_user() {
        let event = listing(24, 30);
        assert_eq!(event.spots_left(false), 6);
        assert_eq!(event.spots_left(true), 5);
    }

    #[test]
    fn test_spots_left_saturates() {
        let event = listing(30, 30);
        assert!(event.is_full());
        assert_eq!(event.spots_left(false), 0);
        assert_eq!(event.spots_left(true), 0);

        let overbooked = listing(35, 30);
        assert_eq!(overbooked.spots_left(false), 0);
    }

    #[test]
    fn test_challenge_percent() {
        let challenges = default_challenges();
        assert_eq!(challenges[0].percent_complete(), 50);
        assert_eq!(challenges[1].percent_complete(), 72);
        assert_eq!(challenges[2].percent_complete(), 35);
    }

    #[test]
    fn test_default_events_have_room() {
        let events = default_events();
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(|e| !e.is_full()));
    }
}
