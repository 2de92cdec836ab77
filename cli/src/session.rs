//! Interactive loop: read a command, run it against the app, redraw.
//!
//! Input and output are generic so the whole loop can be driven from a
//! byte buffer in tests.

use std::io::{self, BufRead, Write};

use todo_core::{ApiError, AuthMode, CredentialStore, TodoApp, TodoId, Transport, ValidationError};
use tracing::{debug, info};

use crate::command::{Command, HELP};
use crate::display::format_view;

/// Give up on the login prompt after this many rejected attempts.
const LOGIN_ATTEMPTS: usize = 3;

enum Flow {
    Continue,
    Quit,
}

pub struct Session<T, S, R, W> {
    app: TodoApp<T, S>,
    input: io::Lines<R>,
    out: W,
}

impl<T, S, R, W> Session<T, S, R, W>
where
    T: Transport,
    S: CredentialStore,
    R: BufRead,
    W: Write,
{
    pub fn new(app: TodoApp<T, S>, input: R, out: W) -> Self {
        Self {
            app,
            input: input.lines(),
            out,
        }
    }

    pub fn app(&self) -> &TodoApp<T, S> {
        &self.app
    }

    pub fn into_parts(self) -> (TodoApp<T, S>, W) {
        (self.app, self.out)
    }

    /// Run until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        if self.app.needs_login() && !self.login()? {
            return Ok(());
        }
        let started = self.app.start();
        if !self.recover(started)? {
            return Ok(());
        }
        self.draw()?;

        loop {
            let Some(line) = self.prompt("> ")? else {
                break;
            };
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(err) => {
                    writeln!(self.out, "{err}")?;
                    continue;
                }
            };
            debug!(?command, "command");
            match self.handle(command)? {
                Flow::Continue => {}
                Flow::Quit => break,
            }
        }
        info!("session finished");
        Ok(())
    }

    fn handle(&mut self, command: Command) -> io::Result<Flow> {
        let result = match command {
            Command::Nothing => return Ok(Flow::Continue),
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => {
                writeln!(self.out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Command::Add(title) => self.app.create(&title),
            Command::Toggle(n) => match self.row_id(n)? {
                Some(id) => self.app.toggle(&id),
                None => return Ok(Flow::Continue),
            },
            Command::Remove(n) => match self.row_id(n)? {
                Some(id) => self.app.remove(&id),
                None => return Ok(Flow::Continue),
            },
            Command::Edit(n, title) => {
                let Some(id) = self.row_id(n)? else {
                    return Ok(Flow::Continue);
                };
                let title = match title {
                    Some(title) => title,
                    None => {
                        let current = self
                            .app
                            .state()
                            .get(&id)
                            .map(|t| t.title.clone())
                            .unwrap_or_default();
                        // An empty answer cancels, like dismissing a prompt.
                        match self.prompt(&format!("new title [{current}]: "))? {
                            Some(answer) if !answer.trim().is_empty() => answer,
                            _ => return Ok(Flow::Continue),
                        }
                    }
                };
                self.app.edit(&id, &title)
            }
            Command::Filter(value) => self.app.set_filter(&value).map(|_| ()),
            Command::Refresh => self.app.refresh(),
            Command::Login => {
                if !self.login()? {
                    return Ok(Flow::Quit);
                }
                self.app.refresh()
            }
            Command::Register => self.register()?,
            Command::Logout => {
                if self.app.auth_mode() == AuthMode::None {
                    writeln!(self.out, "not logged in: logout needs --auth bearer")?;
                    return Ok(Flow::Continue);
                }
                self.app.logout();
                writeln!(self.out, "logged out")?;
                if !self.login()? {
                    return Ok(Flow::Quit);
                }
                self.app.refresh()
            }
        };
        if !self.recover(result)? {
            return Ok(Flow::Quit);
        }
        self.draw()?;
        Ok(Flow::Continue)
    }

    /// Route auth failures to the login flow. Everything else is already
    /// recorded as the app's notice and shows up on the next draw. Returns
    /// false when the user abandoned the login.
    fn recover(&mut self, result: Result<(), ApiError>) -> io::Result<bool> {
        match result {
            Err(err) if err.is_auth() && self.app.auth_mode() == AuthMode::Bearer => {
                writeln!(self.out, "{err}")?;
                if !self.login()? {
                    return Ok(false);
                }
                // Errors here surface as the notice.
                let _ = self.app.refresh();
                Ok(true)
            }
            _ => Ok(true),
        }
    }

    fn login(&mut self) -> io::Result<bool> {
        for _ in 0..LOGIN_ATTEMPTS {
            let Some((username, password)) = self.ask_credentials()? else {
                return Ok(false);
            };
            match self.app.login(&username, &password) {
                Ok(()) => {
                    writeln!(self.out, "logged in as {username}")?;
                    return Ok(true);
                }
                Err(err) => writeln!(self.out, "login failed: {err}")?,
            }
        }
        writeln!(self.out, "too many failed attempts")?;
        Ok(false)
    }

    fn register(&mut self) -> io::Result<Result<(), ApiError>> {
        let Some((username, password)) = self.ask_credentials()? else {
            return Ok(Ok(()));
        };
        let result = self.app.register(&username, &password);
        if result.is_ok() {
            writeln!(self.out, "registered {username}, you can now log in")?;
        }
        Ok(result)
    }

    fn ask_credentials(&mut self) -> io::Result<Option<(String, String)>> {
        let Some(username) = self.prompt("username: ")? else {
            return Ok(None);
        };
        let Some(password) = self.prompt("password: ")? else {
            return Ok(None);
        };
        Ok(Some((username.trim().to_string(), password)))
    }

    /// Resolve a 1-based row number of the current view to an item id.
    fn row_id(&mut self, n: usize) -> io::Result<Option<TodoId>> {
        let view = self.app.render();
        match view.row(n) {
            Some(row) => Ok(Some(row.id.clone())),
            None => {
                writeln!(self.out, "{}", ValidationError::UnknownRow(n))?;
                Ok(None)
            }
        }
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        self.input.next().transpose()
    }

    fn draw(&mut self) -> io::Result<()> {
        let view = self.app.render();
        write!(self.out, "{}", format_view(&view))
    }
}
