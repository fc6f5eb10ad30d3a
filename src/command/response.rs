//! Chat responses produced by the queue commands.

use crate::core::{Item, Queue, UserCache};

/// Formats outcome messages, resolving user ids to display names.
pub struct Responses<'a> {
    users: &'a UserCache,
}

impl<'a> Responses<'a> {
    pub fn new(users: &'a UserCache) -> Self {
        Self { users }
    }

    /// `@name`, or the raw id for users we have never seen.
    pub fn mention(&self, id: &str) -> String {
        match self.users.name(id) {
            Some(name) => format!("@{}", name),
            None => id.to_string(),
        }
    }

    /// Display name without the `@`, for listings that should not ping.
    pub fn name(&self, id: &str) -> String {
        self.users.name(id).unwrap_or(id).to_string()
    }

    pub fn label(&self, item: &Item) -> String {
        format!("{} ({})", self.mention(&item.id), item.reason)
    }

    /// Advisory addressed to the user who issued the command.
    pub fn advise(&self, actor: &str, text: &str) -> String {
        format!("{} {}", self.mention(actor), text)
    }

    pub fn now_has_token(&self, item: &Item) -> String {
        format!("{} now has the token", self.label(item))
    }

    /// Who holds the token after a release.
    pub fn token_report(&self, queue: &Queue) -> String {
        match queue.active() {
            Some(item) => self.now_has_token(item),
            None => "The token is up for grabs".to_string(),
        }
    }

    pub fn join_waiting(&self, item: &Item, position: usize) -> String {
        format!("{} is now {} in line", self.label(item), ordinal(position))
    }

    pub fn done(&self, finished: &Item, queue: &Queue) -> String {
        format!(
            "{} has finished with the token\n{}",
            self.label(finished),
            self.token_report(queue)
        )
    }

    pub fn yielded(&self, item: &Item, queue: &Queue) -> String {
        format!("{} has yielded the token\n{}", self.label(item), self.token_report(queue))
    }

    pub fn barged(&self, item: &Item) -> String {
        format!("{} barged to the front of the line", self.label(item))
    }

    pub fn left(&self, item: &Item) -> String {
        format!("{} has left the queue", self.label(item))
    }

    pub fn booted(&self, actor: &str, item: &Item) -> String {
        format!("{} booted {} from the list", self.mention(actor), self.label(item))
    }

    pub fn boot_no_entry(&self, actor: &str, name: &str, reason: &str) -> String {
        if reason.is_empty() {
            self.advise(actor, &format!("No entry for {} was found", name))
        } else {
            self.advise(
                actor,
                &format!(
                    "No entry for {} with a reason that starts with '{}' was found",
                    name, reason
                ),
            )
        }
    }

    pub fn ousted(&self, actor: &str, item: &Item, queue: &Queue) -> String {
        format!(
            "{} ousted {}\n{}",
            self.mention(actor),
            self.label(item),
            self.token_report(queue)
        )
    }

    pub fn delegated_active(&self, from: &Item, to: &Item) -> String {
        format!(
            "{} delegated the token to {}\n{}",
            self.label(from),
            self.mention(&to.id),
            self.now_has_token(to)
        )
    }

    pub fn delegated(&self, from: &Item, to_id: &str) -> String {
        format!(
            "{} handed their place in line to {}",
            self.label(from),
            self.mention(to_id)
        )
    }

    pub fn refuse_token_active(&self, from: &Item) -> String {
        self.advise(
            &from.id,
            &format!("I can't take the token for {}, I'm only a bot", from.reason),
        )
    }

    pub fn refuse_token(&self, actor: &str) -> String {
        self.advise(actor, "No thanks, I'm only a bot")
    }

    pub fn list(&self, queue: &Queue) -> String {
        let Some(active) = queue.active() else {
            return "The queue is empty".to_string();
        };

        let mut lines = vec![format!(
            "{} ({}) has the token",
            self.name(&active.id),
            active.reason
        )];
        for (idx, item) in queue.waiting().iter().enumerate() {
            lines.push(format!(
                "{}: {} ({})",
                ordinal(idx + 1),
                self.name(&item.id),
                item.reason
            ));
        }
        lines.join("\n")
    }
}

/// English ordinal: 1st, 2nd, 3rd, 4th ... 11th, 12th, 13th ... 21st.
pub fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserInfo;

    #[test]
    fn test_ordinal() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (102, "102nd"),
            (111, "111th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected);
        }
    }

    #[test]
    fn test_mention_falls_back_to_id() {
        let users = UserCache::new(vec![UserInfo::new("U1", "craig")]);
        let r = Responses::new(&users);
        assert_eq!(r.mention("U1"), "@craig");
        assert_eq!(r.mention("U2"), "U2");
    }

    #[test]
    fn test_list() {
        let users = UserCache::new(vec![
            UserInfo::new("U1", "craig"),
            UserInfo::new("U2", "edward"),
        ]);
        let r = Responses::new(&users);

        assert_eq!(r.list(&Queue::new()), "The queue is empty");

        let q = Queue::new()
            .add(Item::new("U1", "deploy"))
            .add(Item::new("U2", "hotfix"))
            .add(Item::new("U3", "review"));
        assert_eq!(
            r.list(&q),
            "craig (deploy) has the token\n1st: edward (hotfix)\n2nd: U3 (review)"
        );
    }
}
