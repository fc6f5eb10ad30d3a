//! Commands a user issues about their own place in the queue.

use crate::core::{Item, Queue};

use super::parse::starts_with_ignore_case;
use super::{Context, Notification};

/// `join <reason>`: get in line.
pub fn join(q: &Queue, ctx: &Context<'_>, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
    let reason = args.trim();
    if reason.is_empty() {
        return (q.clone(), Notification::none(channel));
    }

    let item = Item::new(actor, reason);
    if q.contains(&item) {
        return (q.clone(), Notification::none(channel));
    }

    let was_empty = q.is_empty();
    let q = q.add(item.clone());
    let r = ctx.responses();

    let message = if was_empty {
        ctx.log_activity(&item, "joined and is active");
        r.now_has_token(&item)
    } else {
        ctx.log_activity(&item, "joined");
        r.join_waiting(&item, q.waiting().len())
    };
    (q, Notification::new(channel, message))
}

/// `done`: the token holder releases the token and leaves.
pub fn done(q: &Queue, ctx: &Context<'_>, channel: &str, actor: &str, _args: &str) -> (Queue, Notification) {
    let Some(active) = q.active().cloned() else {
        return (q.clone(), Notification::none(channel));
    };

    let r = ctx.responses();
    if active.id != actor {
        let message = r.advise(actor, "You cannot be done if you don't have the token");
        return (q.clone(), Notification::new(channel, message));
    }

    let q = q.remove(&active);
    ctx.log_activity(&active, "is done");
    if let Some(next) = q.active() {
        ctx.log_activity(next, "is active");
    }

    let message = r.done(&active, &q);
    (q, Notification::new(channel, message))
}

/// `yield`: the token holder lets the next in line go first and moves to
/// the back of the line.
pub fn yield_token(q: &Queue, ctx: &Context<'_>, channel: &str, actor: &str, _args: &str) -> (Queue, Notification) {
    let Some(active) = q.active().cloned() else {
        return (q.clone(), Notification::none(channel));
    };

    let r = ctx.responses();
    if active.id != actor {
        let message = r.advise(actor, "You cannot yield if you don't have the token");
        return (q.clone(), Notification::new(channel, message));
    }
    if q.waiting().is_empty() {
        let message = r.advise(actor, "You cannot yield if nobody is waiting");
        return (q.clone(), Notification::new(channel, message));
    }

    let q = q.yield_token();
    ctx.log_activity(&active, "yielded");
    if let Some(next) = q.active() {
        ctx.log_activity(next, "is active");
    }

    let message = r.yielded(&active, &q);
    (q, Notification::new(channel, message))
}

/// `barge <reason>`: jump to the front of the line.
pub fn barge(q: &Queue, ctx: &Context<'_>, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
    let reason = args.trim();
    if reason.is_empty() {
        return (q.clone(), Notification::none(channel));
    }

    let item = Item::new(actor, reason);
    if q.active() == Some(&item) || q.waiting().first() == Some(&item) {
        return (q.clone(), Notification::none(channel));
    }

    let was_empty = q.is_empty();
    let q = q.barge(item.clone());
    let r = ctx.responses();

    let message = if was_empty {
        ctx.log_activity(&item, "barged and is active");
        r.now_has_token(&item)
    } else {
        ctx.log_activity(&item, "barged");
        r.barged(&item)
    };
    (q, Notification::new(channel, message))
}

/// `leave [reason]`: drop out of the line without holding the token.
pub fn leave(q: &Queue, ctx: &Context<'_>, channel: &str, actor: &str, args: &str) -> (Queue, Notification) {
    if q.is_empty() {
        return (q.clone(), Notification::none(channel));
    }

    let prefix = args.trim();
    let matches = |i: &Item| i.id == actor && starts_with_ignore_case(&i.reason, prefix);
    let r = ctx.responses();

    // Waiting entries start at index 1.
    if let Some(idx) = q.waiting().iter().rposition(|i| matches(i)) {
        let item = q.waiting()[idx].clone();
        let q = q.remove_at(idx + 1);
        ctx.log_activity(&item, "left");
        return (q, Notification::new(channel, r.left(&item)));
    }

    let message = if q.active().map_or(false, |i| matches(i)) {
        r.advise(actor, "You have the token, use done to release it")
    } else {
        r.advise(actor, "You are not waiting in the queue")
    };
    (q.clone(), Notification::new(channel, message))
}
