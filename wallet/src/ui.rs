//! User Interface Façade
//!
//! The wallet never draws anything itself; the host implements
//! [`UserInterface`] with whatever toolkit it likes, including none. The
//! façade tracks lifecycle state: startup produces the host's top-level
//! handle, prompts require a running interface, and shutdown is
//! terminal.

use std::mem;

use tracing::debug;
use wbc_core::{Error, Result};

/// Host-provided user interface.
///
/// `startup` is the required operation; `shutdown` defaults to dropping
/// the handle. Implementations report their own failures through the
/// library error type; `Error::StartupFailed` is the conventional
/// startup failure.
pub trait UserInterface {
    /// Opaque top-level window or surface handle.
    type Window;

    /// Start the interface, producing its top-level handle.
    fn startup(&mut self) -> Result<Self::Window>;

    /// Shut the interface down.
    fn shutdown(&mut self, window: Self::Window) -> Result<()> {
        drop(window);
        Ok(())
    }

    /// Present `terms` and ask the user to accept or reject.
    ///
    /// Returns `Ok(true)` on acceptance and `Ok(false)` on rejection;
    /// rejection is an answer, not an error. An `Err` means the prompt
    /// could not be presented at all.
    fn show_terms(&mut self, window: &mut Self::Window, terms: &str) -> Result<bool>;
}

enum UiState<W> {
    Unstarted,
    Running(W),
    Shutdown,
}

/// Owning façade over a [`UserInterface`].
pub struct Ui<U: UserInterface> {
    interface: U,
    state: UiState<U::Window>,
}

impl<U: UserInterface> Ui<U> {
    /// Wrap an interface. The façade starts in the unstarted state.
    pub fn new(interface: U) -> Self {
        Self {
            interface,
            state: UiState::Unstarted,
        }
    }

    /// Start the interface.
    ///
    /// Valid only from the unstarted state; a startup failure is
    /// propagated and leaves the façade unstarted.
    pub fn startup(&mut self) -> Result<()> {
        match self.state {
            UiState::Unstarted => {}
            _ => return Err(Error::InvalidArgument),
        }
        let window = self.interface.startup()?;
        self.state = UiState::Running(window);
        Ok(())
    }

    /// Shut the interface down. Terminal: the façade cannot restart.
    ///
    /// Shutting down a façade that never started is a no-op that still
    /// spends it; shutting down twice is `Error::InvalidArgument`.
    pub fn shutdown(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, UiState::Shutdown) {
            UiState::Running(window) => self.interface.shutdown(window),
            UiState::Unstarted => Ok(()),
            UiState::Shutdown => Err(Error::InvalidArgument),
        }
    }

    /// Whether the interface is currently running.
    pub fn is_running(&self) -> bool {
        matches!(self.state, UiState::Running(_))
    }

    /// Present `terms` to the user; `Ok(true)` means accepted.
    ///
    /// Fails with `Error::Headless` unless the interface is running.
    pub fn show_terms(&mut self, terms: &str) -> Result<bool> {
        match &mut self.state {
            UiState::Running(window) => self.interface.show_terms(window, terms),
            _ => Err(Error::Headless),
        }
    }
}

impl<U: UserInterface> Drop for Ui<U> {
    fn drop(&mut self) {
        if let UiState::Running(window) = mem::replace(&mut self.state, UiState::Shutdown) {
            if let Err(err) = self.interface.shutdown(window) {
                debug!(?err, "interface teardown reported an error on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct TestInterface {
        fail_startup: bool,
        fail_prompt: bool,
        accept: bool,
        prompts: Arc<AtomicUsize>,
        shutdowns: Arc<AtomicUsize>,
    }

    impl UserInterface for TestInterface {
        type Window = ();

        fn startup(&mut self) -> Result<()> {
            if self.fail_startup {
                Err(Error::StartupFailed)
            } else {
                Ok(())
            }
        }

        fn shutdown(&mut self, _window: ()) -> Result<()> {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn show_terms(&mut self, _window: &mut (), _terms: &str) -> Result<bool> {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            if self.fail_prompt {
                Err(Error::InvalidArgument)
            } else {
                Ok(self.accept)
            }
        }
    }

    #[test]
    fn prompting_requires_startup() {
        let mut ui = Ui::new(TestInterface::default());
        assert_eq!(ui.show_terms("foo"), Err(Error::Headless));
        ui.startup().unwrap();
        assert!(ui.is_running());
        assert_eq!(ui.show_terms("foo").unwrap(), false);
    }

    #[test]
    fn rejection_is_an_answer_not_an_error() {
        let mut ui = Ui::new(TestInterface {
            accept: false,
            ..Default::default()
        });
        ui.startup().unwrap();
        assert_eq!(ui.show_terms("foo"), Ok(false));
        let mut ui = Ui::new(TestInterface {
            accept: true,
            ..Default::default()
        });
        ui.startup().unwrap();
        assert_eq!(ui.show_terms("foo"), Ok(true));
    }

    #[test]
    fn startup_failure_leaves_unstarted() {
        let mut ui = Ui::new(TestInterface {
            fail_startup: true,
            ..Default::default()
        });
        assert_eq!(ui.startup(), Err(Error::StartupFailed));
        assert!(!ui.is_running());
        assert_eq!(ui.show_terms("foo"), Err(Error::Headless));
    }

    #[test]
    fn double_startup_is_misuse() {
        let mut ui = Ui::new(TestInterface::default());
        ui.startup().unwrap();
        assert_eq!(ui.startup(), Err(Error::InvalidArgument));
    }

    #[test]
    fn shutdown_is_terminal() {
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let mut ui = Ui::new(TestInterface {
            shutdowns: shutdowns.clone(),
            ..Default::default()
        });
        ui.startup().unwrap();
        ui.shutdown().unwrap();
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
        assert_eq!(ui.show_terms("foo"), Err(Error::Headless));
        assert_eq!(ui.startup(), Err(Error::InvalidArgument));
        assert_eq!(ui.shutdown(), Err(Error::InvalidArgument));
    }

    #[test]
    fn drop_shuts_a_running_interface_down() {
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let mut ui = Ui::new(TestInterface {
            shutdowns: shutdowns.clone(),
            ..Default::default()
        });
        ui.startup().unwrap();
        drop(ui);
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }
}
