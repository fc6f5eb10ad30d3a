//! Read-only commands.

use crate::core::Queue;

use super::{Context, Notification};

/// `list`: show who has the token and who is waiting.
pub fn list(q: &Queue, ctx: &Context<'_>, channel: &str, _actor: &str, _args: &str) -> (Queue, Notification) {
    let message = ctx.responses().list(q);
    (q.clone(), Notification::new(channel, message))
}

/// `help`: usage summary.
pub fn help(q: &Queue, ctx: &Context<'_>, channel: &str, _actor: &str, _args: &str) -> (Queue, Notification) {
    let message = format!(
        r#"Talk to me with /command or @{name} command.

join <reason> - Join the queue
leave [reason] - Leave the queue
done - Release the token and leave
yield - Let the next in line go first, keep your place at the back
barge <reason> - Jump to the front of the line
boot <name> [reason] - Remove someone from the waiting list
oust <name> - Take the token from its holder
delegate [position] <name> - Give one of your places to someone else
list - Show the queue
help - Show this help

In a direct message only list and help are available."#,
        name = ctx.bot_name
    );
    (q.clone(), Notification::new(channel, message))
}
