//! Commands that act on other people's entries: boot, oust, delegate.

use crate::core::{Item, Queue};

use super::parse::{parse_position, split_word, starts_with_ignore_case};
use super::{Context, Notification};

/// `boot <name> [reason]`: remove someone's waiting entry.
///
/// The waiting section is searched from the back, so the most recent matching
/// entry goes first. The token holder cannot be booted, only ousted.
pub fn boot(q: &Queue, ctx: &Context<'_>, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
    if q.is_empty() {
        return (q.clone(), Notification::none(channel));
    }

    let r = ctx.responses();
    let (name, reason) = split_word(args);
    if name.is_empty() {
        let message = r.advise(actor, "You must specify who you want to boot");
        return (q.clone(), Notification::new(channel, message));
    }

    let matches = |i: &Item| ctx.users.name_matches(&i.id, name) && starts_with_ignore_case(&i.reason, reason);

    if let Some(idx) = q.waiting().iter().rposition(|i| matches(i)) {
        let item = q.waiting()[idx].clone();
        let q = q.remove_at(idx + 1);
        ctx.log_activity(&item, &format!("booted by {}", r.name(actor)));
        return (q, Notification::new(channel, r.booted(actor, &item)));
    }

    let message = if q.active().map_or(false, |i| matches(i)) {
        r.advise(actor, "You must oust the token holder")
    } else {
        r.boot_no_entry(actor, name, reason)
    };
    (q.clone(), Notification::new(channel, message))
}

/// `oust <name>`: take the token away from its holder.
///
/// The ousted holder drops in directly behind the new holder, or out of the
/// queue if nobody was waiting.
pub fn oust(q: &Queue, ctx: &Context<'_>, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
    let Some(active) = q.active().cloned() else {
        return (q.clone(), Notification::none(channel));
    };

    let r = ctx.responses();
    let (target, _) = split_word(args);
    if target.is_empty() {
        let message = r.advise(actor, "You must specify who you want to oust");
        return (q.clone(), Notification::new(channel, message));
    }

    if !ctx.users.name_matches(&active.id, target) {
        let message = r.advise(actor, "You can only oust the token holder");
        return (q.clone(), Notification::new(channel, message));
    }

    if active.id == actor {
        let message = r.advise(actor, "You cannot oust yourself, use done instead");
        return (q.clone(), Notification::new(channel, message));
    }

    let q = q.remove_at(0);
    let q = if q.is_empty() { q } else { q.insert_at(1, active.clone()) };

    ctx.log_activity(&active, &format!("ousted by {}", r.name(actor)));
    if let Some(next) = q.active() {
        ctx.log_activity(next, "is active");
    }

    let message = r.ousted(actor, &active, &q);
    (q, Notification::new(channel, message))
}

/// `delegate [position] <name>`: hand one of your entries to someone else.
///
/// Without a position the actor's most recent entry is used. Position 0 is
/// the token slot, N is Nth in line.
pub fn delegate(q: &Queue, ctx: &Context<'_>, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
    if q.is_empty() {
        return (q.clone(), Notification::none(channel));
    }

    let r = ctx.responses();
    let advise = |text: &str| (q.clone(), Notification::new(channel, r.advise(actor, text)));

    let (position, name) = parse_position(args);
    if name.is_empty() {
        return advise("You must specify who you want to delegate to");
    }

    let Some(target) = ctx.users.find_id(name) else {
        return advise(&format!("There is no user called {}", name));
    };

    let (idx, entry) = match position {
        Some(position) => match q.items().get(position) {
            Some(entry) => (position, entry.clone()),
            None => return advise(&format!("There is no entry at position {}", position)),
        },
        None => match q.iter().rposition(|i| i.id == actor) {
            Some(idx) => (idx, q.items()[idx].clone()),
            None => return advise("You do not have an entry to delegate"),
        },
    };

    if entry.id != actor {
        return advise(&format!("You do not own the entry at position {}", idx));
    }

    let is_active = idx == 0;
    let replacement = Item::new(target, entry.reason.clone());

    if target == ctx.bot_id {
        let message = if is_active {
            r.refuse_token_active(&entry)
        } else {
            r.refuse_token(actor)
        };
        return (q.clone(), Notification::new(channel, message));
    }

    if target == actor {
        return advise("That entry is already yours");
    }

    let q = q.delegate_at(idx, replacement.clone());
    ctx.log_activity(&entry, &format!("delegated to {} ({})", r.name(target), target));

    let message = if is_active {
        ctx.log_activity(&replacement, "is active");
        r.delegated_active(&entry, &replacement)
    } else {
        r.delegated(&entry, target)
    };
    (q, Notification::new(channel, message))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{queue, run_cases, Case};
    use super::*;

    #[test]
    fn test_boot() {
        run_cases(
            boot,
            vec![
                Case {
                    test: "remove last entry with matching name",
                    start: queue(&[("U123", "Active"), ("U456", "First"), ("U456", "Last")]),
                    user: "U789",
                    args: "edward",
                    expected: queue(&[("U123", "Active"), ("U456", "First")]),
                    response: "@andrew booted @edward (Last) from the list",
                },
                Case {
                    test: "remove last entry with matching name and reason prefix",
                    start: queue(&[("U123", "Active"), ("U456", "First"), ("U456", "Fitbit"), ("U456", "Last")]),
                    user: "U789",
                    args: "edward Fi",
                    expected: queue(&[("U123", "Active"), ("U456", "First"), ("U456", "Last")]),
                    response: "@andrew booted @edward (Fitbit) from the list",
                },
                Case {
                    test: "name prefix is case insensitive",
                    start: queue(&[("U123", "Active"), ("U456", "First")]),
                    user: "U789",
                    args: "ED",
                    expected: queue(&[("U123", "Active")]),
                    response: "@andrew booted @edward (First) from the list",
                },
                Case {
                    test: "advise to oust if target has the token",
                    start: queue(&[("U123", "Active"), ("U456", "First")]),
                    user: "U789",
                    args: "craig",
                    expected: queue(&[("U123", "Active"), ("U456", "First")]),
                    response: "@andrew You must oust the token holder",
                },
                Case {
                    test: "no matching reason",
                    start: queue(&[("U123", "Active"), ("U456", "First")]),
                    user: "U456",
                    args: "andrew something",
                    expected: queue(&[("U123", "Active"), ("U456", "First")]),
                    response: "@edward No entry for andrew with a reason that starts with 'something' was found",
                },
                Case {
                    test: "no matching name",
                    start: queue(&[("U123", "Active"), ("U456", "First")]),
                    user: "U456",
                    args: "banana",
                    expected: queue(&[("U123", "Active"), ("U456", "First")]),
                    response: "@edward No entry for banana was found",
                },
                Case {
                    test: "missing target",
                    start: queue(&[("U123", "Active"), ("U456", "First")]),
                    user: "U456",
                    args: "",
                    expected: queue(&[("U123", "Active"), ("U456", "First")]),
                    response: "@edward You must specify who you want to boot",
                },
                Case {
                    test: "do nothing if the queue is empty",
                    start: Queue::new(),
                    user: "U456",
                    args: "andrew something",
                    expected: Queue::new(),
                    response: "",
                },
            ],
        );
    }

    #[test]
    fn test_oust() {
        run_cases(
            oust,
            vec![
                Case {
                    test: "swap active with next in line",
                    start: queue(&[("U123", "Active"), ("U456", "First"), ("U789", "Last")]),
                    user: "U789",
                    args: "craig",
                    expected: queue(&[("U456", "First"), ("U123", "Active"), ("U789", "Last")]),
                    response: "@andrew ousted @craig (Active)\n@edward (First) now has the token",
                },
                Case {
                    test: "ousted holder keeps a waiting copy of the same entry",
                    start: queue(&[("U123", "a"), ("U456", "b"), ("U123", "a")]),
                    user: "U789",
                    args: "craig",
                    expected: queue(&[("U456", "b"), ("U123", "a"), ("U123", "a")]),
                    response: "@andrew ousted @craig (a)\n@edward (b) now has the token",
                },
                Case {
                    test: "remove if nobody waiting",
                    start: queue(&[("U123", "Active")]),
                    user: "U789",
                    args: "craig",
                    expected: Queue::new(),
                    response: "@andrew ousted @craig (Active)\nThe token is up for grabs",
                },
                Case {
                    test: "warns if target not active",
                    start: queue(&[("U123", "Active"), ("U456", "First")]),
                    user: "U789",
                    args: "edward",
                    expected: queue(&[("U123", "Active"), ("U456", "First")]),
                    response: "@andrew You can only oust the token holder",
                },
                Case {
                    test: "warns if target not valid",
                    start: queue(&[("U123", "Active"), ("U456", "First")]),
                    user: "U789",
                    args: "banana",
                    expected: queue(&[("U123", "Active"), ("U456", "First")]),
                    response: "@andrew You can only oust the token holder",
                },
                Case {
                    test: "warns if target missing",
                    start: queue(&[("U123", "Active"), ("U456", "First")]),
                    user: "U789",
                    args: "",
                    expected: queue(&[("U123", "Active"), ("U456", "First")]),
                    response: "@andrew You must specify who you want to oust",
                },
                Case {
                    test: "holder cannot oust themselves",
                    start: queue(&[("U123", "Active"), ("U456", "First")]),
                    user: "U123",
                    args: "craig",
                    expected: queue(&[("U123", "Active"), ("U456", "First")]),
                    response: "@craig You cannot oust yourself, use done instead",
                },
                Case {
                    test: "does nothing if queue empty",
                    start: Queue::new(),
                    user: "U789",
                    args: "craig",
                    expected: Queue::new(),
                    response: "",
                },
            ],
        );
    }

    #[test]
    fn test_delegate() {
        run_cases(
            delegate,
            vec![
                Case {
                    test: "delegate onto an entry the target already holds",
                    start: queue(&[("U123", "a"), ("U456", "b"), ("U789", "a")]),
                    user: "U789",
                    args: "craig",
                    expected: queue(&[("U123", "a"), ("U456", "b"), ("U123", "a")]),
                    response: "@andrew (a) handed their place in line to @craig",
                },
                Case {
                    test: "position picks the later of two identical entries",
                    start: queue(&[("U123", "a"), ("U456", "b"), ("U123", "a")]),
                    user: "U123",
                    args: "2 andrew",
                    expected: queue(&[("U123", "a"), ("U456", "b"), ("U789", "a")]),
                    response: "@craig (a) handed their place in line to @andrew",
                },
                Case {
                    test: "position 0 with an identical waiting entry hands over the token",
                    start: queue(&[("U123", "a"), ("U456", "b"), ("U123", "a")]),
                    user: "U123",
                    args: "0 andrew",
                    expected: queue(&[("U789", "a"), ("U456", "b"), ("U123", "a")]),
                    response: "@craig (a) delegated the token to @andrew\n@andrew (a) now has the token",
                },
                Case {
                    test: "delegate own most recent waiting entry by name",
                    start: queue(&[("U456", "a"), ("U123", "first"), ("U123", "second")]),
                    user: "U123",
                    args: "andrew",
                    expected: queue(&[("U456", "a"), ("U123", "first"), ("U789", "second")]),
                    response: "@craig (second) handed their place in line to @andrew",
                },
                Case {
                    test: "delegate by position",
                    start: queue(&[("U456", "a"), ("U123", "first"), ("U123", "second")]),
                    user: "U123",
                    args: "1 andrew",
                    expected: queue(&[("U456", "a"), ("U789", "first"), ("U123", "second")]),
                    response: "@craig (first) handed their place in line to @andrew",
                },
                Case {
                    test: "delegate the token",
                    start: queue(&[("U123", "deploy"), ("U456", "b")]),
                    user: "U123",
                    args: "and",
                    expected: queue(&[("U789", "deploy"), ("U456", "b")]),
                    response: "@craig (deploy) delegated the token to @andrew\n@andrew (deploy) now has the token",
                },
                Case {
                    test: "refuse entries owned by someone else",
                    start: queue(&[("U456", "a"), ("U123", "b")]),
                    user: "U123",
                    args: "0 andrew",
                    expected: queue(&[("U456", "a"), ("U123", "b")]),
                    response: "@craig You do not own the entry at position 0",
                },
                Case {
                    test: "refuse unknown target",
                    start: queue(&[("U123", "a")]),
                    user: "U123",
                    args: "zebedee",
                    expected: queue(&[("U123", "a")]),
                    response: "@craig There is no user called zebedee",
                },
                Case {
                    test: "refuse position out of range",
                    start: queue(&[("U123", "a")]),
                    user: "U123",
                    args: "4 andrew",
                    expected: queue(&[("U123", "a")]),
                    response: "@craig There is no entry at position 4",
                },
                Case {
                    test: "actor has no entry",
                    start: queue(&[("U456", "a")]),
                    user: "U123",
                    args: "andrew",
                    expected: queue(&[("U456", "a")]),
                    response: "@craig You do not have an entry to delegate",
                },
                Case {
                    test: "bot refuses the token",
                    start: queue(&[("U123", "deploy")]),
                    user: "U123",
                    args: "the_bot",
                    expected: queue(&[("U123", "deploy")]),
                    response: "@craig I can't take the token for deploy, I'm only a bot",
                },
                Case {
                    test: "bot refuses a waiting place",
                    start: queue(&[("U456", "a"), ("U123", "b")]),
                    user: "U123",
                    args: "the_bot_name",
                    expected: queue(&[("U456", "a"), ("U123", "b")]),
                    response: "@craig No thanks, I'm only a bot",
                },
                Case {
                    test: "missing target",
                    start: queue(&[("U123", "a")]),
                    user: "U123",
                    args: "2",
                    expected: queue(&[("U123", "a")]),
                    response: "@craig You must specify who you want to delegate to",
                },
                Case {
                    test: "delegate to yourself",
                    start: queue(&[("U123", "a")]),
                    user: "U123",
                    args: "craig",
                    expected: queue(&[("U123", "a")]),
                    response: "@craig That entry is already yours",
                },
                Case {
                    test: "does nothing if queue empty",
                    start: Queue::new(),
                    user: "U123",
                    args: "andrew",
                    expected: Queue::new(),
                    response: "",
                },
            ],
        );
    }
}
