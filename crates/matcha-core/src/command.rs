/// The result of a widget update: zero or more messages for the parent.
///
/// matcha widgets are fully synchronous, so a `Command` is not a deferred
/// side effect — it is a small value describing what the widget wants its
/// parent to observe. Parents lift child commands into their own message
/// type with [`Command::map`] and can flatten them with
/// [`Command::into_messages`].
///
/// # Examples
///
/// ```rust,ignore
/// // Nothing to report:
/// let cmd = Command::none();
///
/// // A single notification:
/// let cmd = Command::message(Msg::Changed(value));
///
/// // Several notifications from one logical operation:
/// let cmd = Command::batch([
///     Command::message(Msg::Changed(value)),
///     Command::message(Msg::VisibilityChanged(false)),
/// ]);
/// ```
pub struct Command<Msg: Send + 'static> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg: Send + 'static> {
    None,
    Action(Action<Msg>),
    Batch(Vec<Command<Msg>>),
}

/// Action variants a parent handles directly.
pub enum Action<Msg> {
    /// Deliver a message to the parent.
    Message(Msg),
    /// Ask the hosting program to quit.
    Quit,
}

impl<Msg: Send + 'static> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Deliver a message to the parent.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Action(Action::Message(msg)),
        }
    }

    /// Ask the hosting program to quit.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Action(Action::Quit),
        }
    }

    /// Combine multiple commands. Empty input collapses to
    /// [`Command::none`]; a single command is returned unwrapped.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().unwrap(),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg: Send + 'static>(
        self,
        f: impl Fn(Msg) -> NewMsg + Send + Sync + 'static,
    ) -> Command<NewMsg> {
        self.map_ref(&f)
    }

    fn map_ref<NewMsg: Send + 'static, F: Fn(Msg) -> NewMsg>(self, f: &F) -> Command<NewMsg> {
        match self.inner {
            CommandInner::None => Command::none(),
            CommandInner::Action(Action::Message(msg)) => Command::message(f(msg)),
            CommandInner::Action(Action::Quit) => Command::quit(),
            CommandInner::Batch(cmds) => Command {
                inner: CommandInner::Batch(cmds.into_iter().map(|c| c.map_ref(f)).collect()),
            },
        }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// If this command is a single message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Action(Action::Message(msg)) => Some(msg),
            _ => None,
        }
    }

    /// If this command is a batch, return the inner commands.
    pub fn into_batch(self) -> Option<Vec<Command<Msg>>> {
        match self.inner {
            CommandInner::Batch(cmds) => Some(cmds),
            _ => None,
        }
    }

    /// Flatten into the ordered list of carried messages, dropping
    /// everything that is not a message.
    pub fn into_messages(self) -> Vec<Msg> {
        match self.inner {
            CommandInner::None | CommandInner::Action(Action::Quit) => Vec::new(),
            CommandInner::Action(Action::Message(msg)) => vec![msg],
            CommandInner::Batch(cmds) => {
                cmds.into_iter().flat_map(Command::into_messages).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_none() {
        let cmd: Command<()> = Command::none();
        assert!(cmd.is_none());
    }

    #[test]
    fn message_carries_payload() {
        let cmd: Command<i32> = Command::message(42);
        assert_eq!(cmd.into_message(), Some(42));
    }

    #[test]
    fn quit_is_not_a_message() {
        let cmd: Command<i32> = Command::quit();
        assert_eq!(cmd.into_message(), None);
    }

    #[test]
    fn batch_empty_returns_none() {
        let cmd: Command<()> = Command::batch(vec![]);
        assert!(cmd.is_none());
    }

    #[test]
    fn batch_single_unwraps() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1)]);
        assert_eq!(cmd.into_message(), Some(1));
    }

    #[test]
    fn batch_drops_none_entries() {
        let cmd: Command<i32> =
            Command::batch(vec![Command::none(), Command::message(7), Command::none()]);
        assert_eq!(cmd.into_message(), Some(7));
    }

    #[test]
    fn batch_multiple() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        let inner = cmd.into_batch().expect("expected batch");
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn map_message() {
        let cmd: Command<i32> = Command::message(42);
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert_eq!(mapped.into_message(), Some("42".to_string()));
    }

    #[test]
    fn map_quit_stays_quit() {
        let cmd: Command<i32> = Command::quit();
        let mapped: Command<String> = cmd.map(|n| n.to_string());
        assert!(matches!(
            mapped.inner,
            CommandInner::Action(Action::Quit)
        ));
    }

    #[test]
    fn map_batch_preserves_order() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::message(2)]);
        let mapped = cmd.map(|n| n * 10);
        assert_eq!(mapped.into_messages(), vec![10, 20]);
    }

    #[test]
    fn into_messages_flattens_nested_batches() {
        let cmd: Command<i32> = Command::batch(vec![
            Command::message(1),
            Command::batch(vec![Command::message(2), Command::message(3)]),
        ]);
        assert_eq!(cmd.into_messages(), vec![1, 2, 3]);
    }

    #[test]
    fn into_messages_skips_quit() {
        let cmd: Command<i32> = Command::batch(vec![Command::message(1), Command::quit()]);
        assert_eq!(cmd.into_messages(), vec![1]);
    }
}
