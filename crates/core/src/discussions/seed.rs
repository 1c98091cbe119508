//! Starter discussions shown until the page is reloaded

use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::models::{Comment, Discussion, DiscussionDraft, DiscussionKind, Poll, Reaction};

fn reactions(pairs: &[(&str, &str)]) -> Vec<Reaction> {
    pairs
        .iter()
        .map(|(employee_id, reaction)| Reaction {
            employee_id: employee_id.to_string(),
            reaction: reaction.to_string(),
        })
        .collect()
}

fn comments(entries: &[(&str, &str, &str)]) -> Vec<Comment> {
    entries
        .iter()
        .filter_map(|(author, message, at)| {
            // Seed times are wall-clock times in the viewer's zone
            let naive = NaiveDateTime::parse_from_str(at, "%Y-%m-%dT%H:%M:%S").ok()?;
            let timestamp = Local.from_local_datetime(&naive).earliest()?.with_timezone(&Utc);
            Some(Comment {
                employee_id: author.to_string(),
                message: message.to_string(),
                timestamp,
            })
        })
        .collect()
}

fn poll(options: &[&str], responses: &[(&str, &str)]) -> DiscussionKind {
    let mut poll = Poll::new(options.iter().map(|o| o.to_string()).collect());
    for (employee_id, option) in responses {
        poll.poll_responses
            .insert(employee_id.to_string(), option.to_string());
    }
    DiscussionKind::Poll(poll)
}

fn discussion(
    id: &str,
    title: &str,
    content: &str,
    created_by: &str,
    role: &str,
    kind: DiscussionKind,
    created_at: (i32, u32, u32),
) -> Discussion {
    let (y, m, d) = created_at;
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    Discussion::from_draft(
        id.to_string(),
        date,
        DiscussionDraft {
            title: title.to_string(),
            content: content.to_string(),
            created_by: created_by.to_string(),
            role: role.to_string(),
            kind,
        },
    )
}

pub fn seed_discussions() -> Vec<Discussion> {
    vec![
        Discussion::seeded(
            discussion(
                "1",
                "Q1 Company Goals Discussion",
                "Let's discuss our priorities and objectives for the first quarter. What areas should we focus on to achieve maximum growth?",
                "Sarah Johnson",
                "HR",
                DiscussionKind::Forum,
                (2024, 1, 15),
            ),
            reactions(&[("john_doe", "👍"), ("mike_chen", "❤️"), ("emma_davis", "👍")]),
            comments(&[
                (
                    "John Doe",
                    "I think we should focus on customer acquisition and product development.",
                    "2024-01-15T10:30:00",
                ),
                (
                    "Mike Chen",
                    "Agreed! Also improving our internal processes would be beneficial.",
                    "2024-01-15T11:15:00",
                ),
            ]),
        ),
        Discussion::seeded(
            discussion(
                "2",
                "Preferred Work Schedule",
                "We're considering flexible work arrangements. What would be your preferred work schedule?",
                "David Wilson",
                "VP",
                poll(
                    &["Full Remote", "Hybrid (3 days office)", "Full Office", "Flexible Hours"],
                    &[
                        ("john_doe", "Hybrid (3 days office)"),
                        ("sarah_wilson", "Hybrid (3 days office)"),
                        ("mike_chen", "Full Remote"),
                        ("emma_davis", "Flexible Hours"),
                    ],
                ),
                (2024, 1, 14),
            ),
            reactions(&[("sarah_wilson", "👍"), ("alex_rodriguez", "👍")]),
            comments(&[(
                "Sarah Wilson",
                "Hybrid seems like the best balance for collaboration and flexibility.",
                "2024-01-14T14:20:00",
            )]),
        ),
        Discussion::seeded(
            discussion(
                "3",
                "New Health Insurance Benefits",
                "We're excited to announce our enhanced health insurance package starting February 1st. This includes dental, vision, and mental health coverage with reduced premiums.",
                "Lisa Anderson",
                "director",
                DiscussionKind::Announcement,
                (2024, 1, 13),
            ),
            reactions(&[
                ("john_doe", "🎉"),
                ("sarah_wilson", "❤️"),
                ("mike_chen", "👍"),
                ("emma_davis", "🎉"),
            ]),
            comments(&[
                (
                    "John Doe",
                    "This is fantastic news! Thank you for prioritizing employee wellbeing.",
                    "2024-01-13T09:45:00",
                ),
                (
                    "Emma Davis",
                    "The mental health coverage is especially appreciated.",
                    "2024-01-13T10:30:00",
                ),
            ]),
        ),
        Discussion::seeded(
            discussion(
                "4",
                "Team Building Activity Ideas",
                "Planning our next team building event. What type of activities would you enjoy most?",
                "Jennifer Martinez",
                "marketing head",
                poll(
                    &["Outdoor Adventure", "Cooking Class", "Escape Room", "Sports Tournament", "Art Workshop"],
                    &[
                        ("john_doe", "Escape Room"),
                        ("sarah_wilson", "Cooking Class"),
                        ("alex_rodriguez", "Sports Tournament"),
                    ],
                ),
                (2024, 1, 12),
            ),
            reactions(&[("alex_rodriguez", "👍"), ("jennifer_lee", "😊")]),
            Vec::new(),
        ),
        Discussion::seeded(
            discussion(
                "5",
                "Remote Work Policy Updates",
                "We've updated our remote work policy to provide more flexibility. Key changes include flexible core hours and improved home office stipends.",
                "Michael Brown",
                "tech head",
                DiscussionKind::Announcement,
                (2024, 1, 11),
            ),
            reactions(&[("sarah_wilson", "👍"), ("mike_chen", "🎉")]),
            comments(&[(
                "Sarah Wilson",
                "The flexible core hours will really help with work-life balance.",
                "2024-01-11T16:20:00",
            )]),
        ),
    ]
}
