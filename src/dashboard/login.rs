//! Credential entry page

use super::page;
use super::escape;

/// The login form posts back to `action`.
pub fn render(action: &str) -> String {
    let body = format!(
        r#"    <div class="container">
        <form class="login" method="post" action="{action}">
            <h1>Login</h1>
            <label>
                <div>Password</div>
                <input type="password" name="token" autocomplete="current-password">
            </label>
            <button type="submit" class="btn btn-primary">Login</button>
        </form>
    </div>"#,
        action = escape(action)
    );
    page("Login", &body)
}
