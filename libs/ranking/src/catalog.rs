//! Interest and collaboration catalogs offered on the profile editor

/// Interest categories with the interests listed under each
pub const INTERESTS_BY_CATEGORY: &[(&str, &[&str])] = &[
    (
        "Sports & Athletics",
        &[
            "Football",
            "Basketball",
            "Volleyball",
            "Tennis",
            "Swimming",
            "Cricket",
            "Badminton",
            "Running",
            "Cycling",
            "Yoga",
            "Martial Arts",
        ],
    ),
    (
        "Arts & Creative",
        &[
            "Painting",
            "Drawing",
            "Photography",
            "Graphic Design",
            "Sculpture",
            "Creative Writing",
            "Poetry",
            "Film Making",
            "Animation",
        ],
    ),
    (
        "Technology & Programming",
        &[
            "Web Development",
            "Mobile App Development",
            "Data Science",
            "Artificial Intelligence",
            "Game Development",
            "Cybersecurity",
            "Robotics",
            "Blockchain",
        ],
    ),
    (
        "Music & Performance",
        &[
            "Singing",
            "Guitar",
            "Piano",
            "Drums",
            "Violin",
            "Dance",
            "Theater",
            "DJ",
            "Band",
            "Music Production",
        ],
    ),
    (
        "Academic & Learning",
        &[
            "Study Groups",
            "Research",
            "Debates",
            "Language Learning",
            "Literature",
            "Physics",
            "Mathematics",
            "Chemistry",
            "Biology",
            "History",
            "Philosophy",
        ],
    ),
    (
        "Games & Recreation",
        &[
            "Video Games",
            "Board Games",
            "Chess",
            "Card Games",
            "Puzzle Solving",
            "Esports",
            "Role-playing Games",
        ],
    ),
    (
        "Outdoor & Adventure",
        &[
            "Hiking",
            "Camping",
            "Fishing",
            "Rock Climbing",
            "Kayaking",
            "Biking",
            "Bird Watching",
            "Photography",
            "Traveling",
        ],
    ),
    (
        "Social & Community",
        &[
            "Volunteering",
            "Cultural Clubs",
            "Environmental Groups",
            "Social Justice",
            "Debate Teams",
            "Public Speaking",
            "Events Planning",
        ],
    ),
];

/// Kinds of collaboration a user can look for
pub const COLLABORATION_TYPES: &[&str] = &[
    "Study Partners",
    "Project Collaborators",
    "Workout Buddies",
    "Practice Partners",
    "Mentorship",
    "Team Members",
    "Casual Meetups",
    "Skill Exchange",
];

/// Category names in display order
pub fn interest_categories() -> impl Iterator<Item = &'static str> {
    INTERESTS_BY_CATEGORY.iter().map(|(category, _)| *category)
}

/// Interests listed under `category`
pub fn interests_in(category: &str) -> Option<&'static [&'static str]> {
    INTERESTS_BY_CATEGORY
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, interests)| *interests)
}

pub fn is_known_interest(interest: &str) -> bool {
    INTERESTS_BY_CATEGORY
        .iter()
        .any(|(_, interests)| interests.contains(&interest))
}

pub fn is_known_collaboration_type(kind: &str) -> bool {
    COLLABORATION_TYPES.contains(&kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookups() {
        assert_eq!(interest_categories().count(), 8);
        assert!(is_known_interest("Chess"));
        // Listed under two categories
        assert!(is_known_interest("Photography"));
        assert!(!is_known_interest("Knitting"));
        assert!(is_known_collaboration_type("Mentorship"));
        assert!(!is_known_collaboration_type("Pen Pals"));
        assert_eq!(interests_in("Music & Performance").map(<[_]>::len), Some(10));
        assert!(interests_in("Cooking").is_none());
    }
}
