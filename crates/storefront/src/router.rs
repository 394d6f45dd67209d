//! View routing.
//!
//! # Route Structure
//!
//! ```text
//! /       - Sign-in or sign-up form (signed out); redirects to /main (signed in)
//! /main   - Main page (signed in); redirects to / (signed out)
//! ```
//!
//! Which auth form `/` shows is a local toggle, not part of the path.

/// Path of the auth forms.
pub const AUTH_PATH: &str = "/";

/// Path of the main page.
pub const MAIN_PATH: &str = "/main";

/// Which auth form is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthForm {
    #[default]
    SignIn,
    SignUp,
}

impl AuthForm {
    /// The other form.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }
}

/// A renderable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    SignIn,
    SignUp,
    Main,
}

/// Result of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(View),
    Redirect(&'static str),
    NotFound,
}

/// Picks a view from the session flag and the auth form toggle.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewRouter {
    form: AuthForm,
}

impl ViewRouter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            form: AuthForm::SignIn,
        }
    }

    /// Currently selected auth form.
    #[must_use]
    pub const fn form(&self) -> AuthForm {
        self.form
    }

    /// Switch between the sign-in and sign-up forms.
    pub const fn toggle_form(&mut self) -> AuthForm {
        self.form = self.form.toggled();
        self.form
    }

    /// The view to show for a session.
    #[must_use]
    pub const fn view(&self, signed_in: bool) -> View {
        if signed_in {
            return View::Main;
        }
        match self.form {
            AuthForm::SignIn => View::SignIn,
            AuthForm::SignUp => View::SignUp,
        }
    }

    /// Resolve a path for a session.
    #[must_use]
    pub fn resolve(&self, path: &str, signed_in: bool) -> Resolution {
        match (path, signed_in) {
            (AUTH_PATH, false) | (MAIN_PATH, true) => Resolution::Render(self.view(signed_in)),
            (AUTH_PATH, true) => Resolution::Redirect(MAIN_PATH),
            (MAIN_PATH, false) => Resolution::Redirect(AUTH_PATH),
            _ => Resolution::NotFound,
        }
    }
}
