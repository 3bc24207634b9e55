//! Message composition for review notifications.
//!
//! Pure formatting logic: identical inputs always produce byte-identical
//! payloads. The categorized form picks a (color, intro, closing,
//! title-label) tuple per category; events without a category fall back to
//! the legacy single-text form.

use crate::base::types::{Attachment, Category, ChatNotification, ReviewRequestEvent};

/// Per-category framing tuple.
struct Framing {
    color: &'static str,
    intro: &'static str,
    closing: &'static str,
    title_label: &'static str,
}

fn framing(category: Category) -> Framing {
    match category {
        Category::Feature => Framing {
            color: "good",
            intro: "A new pull request is ready for a look.",
            closing: "Happy reviewing! :eyes:",
            title_label: "Review requested",
        },
        Category::Release => Framing {
            color: "warning",
            intro: "A release pull request needs a careful review.",
            closing: "Please double-check before approving. :warning:",
            title_label: "Release review requested",
        },
        Category::Hotfix => Framing {
            color: "danger",
            intro: "A hotfix needs eyes right now.",
            closing: "Please review as soon as you can! :rotating_light:",
            title_label: "Hotfix review requested",
        },
    }
}

/// Formats resolved chat handles as a mention list.
fn mentions(handles: &[String]) -> String {
    handles.iter().map(|handle| format!("<@{handle}>")).collect::<Vec<_>>().join(" ")
}

/// Composes the notification payload for an event and its resolved handles.
///
/// `handles` must be non-empty; the pipeline aborts with a no-recipients
/// outcome before composition otherwise.
pub fn compose(event: &ReviewRequestEvent, handles: &[String]) -> ChatNotification {
    match event.category {
        None => ChatNotification::Text {
            text: format!(
                "Hey {}! :wave: You've been asked to review *{}* in `{}`.\n{}",
                mentions(handles),
                event.pr_title,
                event.repository,
                event.pr_url
            ),
        },
        Some(category) => {
            let framing = framing(category);

            ChatNotification::Attachments {
                attachments: vec![Attachment {
                    color: framing.color.to_string(),
                    title: format!("{}: {}#{}", framing.title_label, event.repository, event.pr_id),
                    text: format!(
                        "{}\n{}, please review *{}*.\n{}\n{}",
                        framing.intro,
                        mentions(handles),
                        event.pr_title,
                        event.pr_url,
                        framing.closing
                    ),
                }],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(category: Option<Category>) -> ReviewRequestEvent {
        ReviewRequestEvent {
            reviewers: vec!["alice".to_string(), "bob".to_string()],
            repository: "acme/widgets".to_string(),
            pr_id: 42,
            pr_url: "https://example.com/acme/widgets/pull/42".to_string(),
            pr_title: "Add frobnicator".to_string(),
            category,
        }
    }

    fn handles() -> Vec<String> {
        vec!["U0001".to_string(), "U0002".to_string()]
    }

    #[test]
    fn uncategorized_uses_the_legacy_text_template() {
        let payload = compose(&event(None), &handles());

        assert_eq!(
            payload,
            ChatNotification::Text {
                text: "Hey <@U0001> <@U0002>! :wave: You've been asked to review *Add frobnicator* in `acme/widgets`.\n\
                       https://example.com/acme/widgets/pull/42"
                    .to_string(),
            }
        );
    }

    #[test]
    fn feature_uses_the_default_framing() {
        let payload = compose(&event(Some(Category::Feature)), &handles());

        assert_eq!(
            payload,
            ChatNotification::Attachments {
                attachments: vec![Attachment {
                    color: "good".to_string(),
                    title: "Review requested: acme/widgets#42".to_string(),
                    text: "A new pull request is ready for a look.\n\
                           <@U0001> <@U0002>, please review *Add frobnicator*.\n\
                           https://example.com/acme/widgets/pull/42\n\
                           Happy reviewing! :eyes:"
                        .to_string(),
                }],
            }
        );
    }

    #[test]
    fn release_uses_the_cautionary_framing() {
        let payload = compose(&event(Some(Category::Release)), &handles());

        assert_eq!(
            payload,
            ChatNotification::Attachments {
                attachments: vec![Attachment {
                    color: "warning".to_string(),
                    title: "Release review requested: acme/widgets#42".to_string(),
                    text: "A release pull request needs a careful review.\n\
                           <@U0001> <@U0002>, please review *Add frobnicator*.\n\
                           https://example.com/acme/widgets/pull/42\n\
                           Please double-check before approving. :warning:"
                        .to_string(),
                }],
            }
        );
    }

    #[test]
    fn hotfix_uses_the_urgent_framing() {
        let payload = compose(&event(Some(Category::Hotfix)), &handles());

        assert_eq!(
            payload,
            ChatNotification::Attachments {
                attachments: vec![Attachment {
                    color: "danger".to_string(),
                    title: "Hotfix review requested: acme/widgets#42".to_string(),
                    text: "A hotfix needs eyes right now.\n\
                           <@U0001> <@U0002>, please review *Add frobnicator*.\n\
                           https://example.com/acme/widgets/pull/42\n\
                           Please review as soon as you can! :rotating_light:"
                        .to_string(),
                }],
            }
        );
    }

    #[test]
    fn composition_is_deterministic() {
        let event = event(Some(Category::Hotfix));
        assert_eq!(compose(&event, &handles()), compose(&event, &handles()));
    }
}
