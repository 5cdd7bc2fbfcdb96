//! html templates for the server-rendered pages.
//!
//! consolidated here to avoid inline html in handlers.

use clientdesk_types::{Client, Personnel, Role, User};

use crate::session::{Flash, FlashKind};

/// escape text for interpolation into html.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
        body { font-family: system-ui, -apple-system, sans-serif; max-width: 900px; margin: 30px auto; padding: 0 20px; color: #222; }
        nav { display: flex; gap: 16px; border-bottom: 1px solid #ddd; padding-bottom: 10px; margin-bottom: 20px; align-items: center; }
        nav .spacer { flex: 1; }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 6px 10px; border-bottom: 1px solid #eee; }
        .flash { padding: 10px 14px; border-radius: 6px; margin-bottom: 10px; }
        .flash.success { background: #e7f7ec; color: #14632e; }
        .flash.warning { background: #fdf3dc; color: #7a5a12; }
        .flash.error { background: #fbe5e5; color: #8a1f1f; }
        .selected { background: #eef4fd; }
        form.inline { display: inline; }
        button { cursor: pointer; }
"#;

fn flash_class(kind: FlashKind) -> &'static str {
    match kind {
        FlashKind::Success => "success",
        FlashKind::Warning => "warning",
        FlashKind::Error => "error",
    }
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|f| {
            format!(
                r#"<div class="flash {}">{}</div>"#,
                flash_class(f.kind),
                escape(&f.message)
            )
        })
        .collect()
}

fn render_nav(user: &User, selected: Option<&Client>) -> String {
    let selection = match selected {
        Some(client) => format!("<strong>Client: {}</strong>", escape(&client.name)),
        None => "<em>No client selected</em>".to_string(),
    };

    format!(
        r#"<nav>
    <a href="/dashboard">Dashboard</a>
    <a href="/clients">Clients</a>
    <a href="/personnel">Personnel</a>
    <a href="/users">Users</a>
    <span class="spacer"></span>
    <span>{selection}</span>
    <span>{name} ({role})</span>
    <form class="inline" method="post" action="/logout"><button type="submit">Log out</button></form>
</nav>"#,
        selection = selection,
        name = escape(&user.name),
        role = user.role,
    )
}

/// shared page chrome for authenticated pages.
pub fn page(
    title: &str,
    user: &User,
    selected: Option<&Client>,
    flashes: &[Flash],
    body: &str,
) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title} - clientdesk</title>
    <style>{STYLE}</style>
</head>
<body>
{nav}
{flashes}
{body}
</body>
</html>"#,
        title = escape(title),
        nav = render_nav(user, selected),
        flashes = render_flashes(flashes),
        body = body,
    )
}

/// login form, optionally with an error message and a sticky email value.
pub fn login_page(error: Option<&str>, email: &str) -> String {
    let error_html = match error {
        Some(msg) => format!(r#"<div class="flash error">{}</div>"#, escape(msg)),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Log in - clientdesk</title>
    <style>{STYLE}</style>
</head>
<body>
    <h1>clientdesk</h1>
    {error_html}
    <form method="post" action="/login">
        <p><label>Email <input type="email" name="email" value="{email}" required></label></p>
        <p><label>Password <input type="password" name="password" required></label></p>
        <p><button type="submit">Log in</button></p>
    </form>
</body>
</html>"#,
        error_html = error_html,
        email = escape(email),
    )
}

/// dashboard body.
pub fn dashboard_body(user: &User, selected: Option<&Client>) -> String {
    let selection = match selected {
        Some(client) => format!(
            "<p>Working with client <strong>{}</strong> ({}).</p>",
            escape(&client.name),
            escape(&client.industry)
        ),
        None => "<p>No client selected. Pick one from the <a href=\"/clients\">client list</a> to scope your views.</p>"
            .to_string(),
    };

    format!(
        "<h1>Dashboard</h1><p>Signed in as {} with the {} role.</p>{}",
        escape(&user.name),
        user.role,
        selection
    )
}

/// client listing body.
pub fn clients_body(clients: &[&Client], selected: Option<&Client>, can_create: bool) -> String {
    let mut rows = String::new();
    for client in clients {
        let is_selected = selected.is_some_and(|s| s.id == client.id);
        let row_class = if is_selected { " class=\"selected\"" } else { "" };
        let action = if is_selected {
            r#"<form class="inline" method="post" action="/clients/clear"><button type="submit">Clear</button></form>"#.to_string()
        } else {
            format!(
                r#"<form class="inline" method="post" action="/clients/{}/select"><button type="submit">Select</button></form>"#,
                client.id
            )
        };
        let active = if client.active { "active" } else { "inactive" };

        rows.push_str(&format!(
            "<tr{row_class}><td>{name}</td><td>{industry}</td><td>{active}</td><td>{action}</td></tr>\n",
            row_class = row_class,
            name = escape(&client.name),
            industry = escape(&client.industry),
            active = active,
            action = action,
        ));
    }

    if rows.is_empty() {
        rows = "<tr><td colspan=\"4\"><em>No clients to show.</em></td></tr>".to_string();
    }

    let create_form = if can_create {
        r#"<h2>New client</h2>
<form method="post" action="/clients">
    <p><label>Name <input name="name" required></label></p>
    <p><label>Industry <input name="industry" required></label></p>
    <p><label>Contact email <input type="email" name="contact_email"></label></p>
    <p><button type="submit">Create client</button></p>
</form>"#
    } else {
        ""
    };

    format!(
        "<h1>Clients</h1><table><tr><th>Name</th><th>Industry</th><th>Status</th><th></th></tr>{rows}</table>{create_form}",
        rows = rows,
        create_form = create_form,
    )
}

/// user listing body.
pub fn users_body(users: &[User], can_manage: bool) -> String {
    let mut rows = String::new();
    for user in users {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&user.name),
            escape(&user.email),
            user.role,
        ));
    }

    let create_link = if can_manage {
        r#"<p><a href="/users/create">Create user</a></p>"#
    } else {
        ""
    };

    format!(
        "<h1>Users</h1><table><tr><th>Name</th><th>Email</th><th>Role</th></tr>{rows}</table>{create_link}",
        rows = rows,
        create_link = create_link,
    )
}

fn client_options(clients: &[&Client]) -> String {
    clients
        .iter()
        .map(|c| format!(r#"<option value="{}">{}</option>"#, c.id, escape(&c.name)))
        .collect()
}

/// user creation form body.
///
/// `assignable` is the set of clients the acting user may hand out grants
/// for; role options are limited to what the actor may assign.
pub fn user_create_body(assignable: &[&Client], roles: &[Role]) -> String {
    let role_options: String = roles
        .iter()
        .map(|r| format!(r#"<option value="{r}">{r}</option>"#))
        .collect();

    format!(
        r#"<h1>Create user</h1>
<form method="post" action="/users">
    <p><label>Name <input name="name" required></label></p>
    <p><label>Email <input type="email" name="email" required></label></p>
    <p><label>Password <input type="password" name="password" required></label></p>
    <p><label>Role <select name="role">{role_options}</select></label></p>
    <p><label>Assign to client <select name="client_id"><option value="">(none)</option>{clients}</select></label></p>
    <p><label>Access level <select name="access_level">
        <option value="read">read</option>
        <option value="write">write</option>
        <option value="admin">admin</option>
    </select></label></p>
    <p><button type="submit">Create user</button></p>
</form>"#,
        role_options = role_options,
        clients = client_options(assignable),
    )
}

/// personnel listing body. rows pair each record with its client's name.
pub fn personnel_body(rows: &[(Personnel, String)], scoped_to: Option<&Client>) -> String {
    let heading = match scoped_to {
        Some(client) => format!("<h1>Personnel - {}</h1>", escape(&client.name)),
        None => "<h1>Personnel</h1>".to_string(),
    };

    let mut body_rows = String::new();
    for (person, client_name) in rows {
        body_rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&person.full_name()),
            escape(client_name),
            escape(person.position.as_deref().unwrap_or("-")),
            escape(person.department.as_deref().unwrap_or("-")),
        ));
    }

    if body_rows.is_empty() {
        body_rows = "<tr><td colspan=\"4\"><em>No personnel to show.</em></td></tr>".to_string();
    }

    format!(
        r#"{heading}<table><tr><th>Name</th><th>Client</th><th>Position</th><th>Department</th></tr>{body_rows}</table>
<p><a href="/personnel/create">Add personnel</a></p>"#,
        heading = heading,
        body_rows = body_rows,
    )
}

/// personnel creation form body.
pub fn personnel_create_body(clients: &[&Client]) -> String {
    format!(
        r#"<h1>Add personnel</h1>
<form method="post" action="/personnel">
    <p><label>Client <select name="client_id" required>{clients}</select></label></p>
    <p><label>First name <input name="first_name" required></label></p>
    <p><label>Last name <input name="last_name" required></label></p>
    <p><label>Email <input type="email" name="email"></label></p>
    <p><label>Phone <input name="phone_number"></label></p>
    <p><label>Position <input name="position"></label></p>
    <p><label>Department <input name="department"></label></p>
    <p><label>Hire date <input type="date" name="hire_date"></label></p>
    <p><button type="submit">Add personnel</button></p>
</form>"#,
        clients = client_options(clients),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clientdesk_types::{ClientId, UserId};

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_login_page_shows_error() {
        let html = login_page(Some("invalid email or password"), "a@b.com");
        assert!(html.contains("invalid email or password"));
        assert!(html.contains("a@b.com"));
    }

    #[test]
    fn test_clients_body_escapes_names() {
        let client = Client::new(
            ClientId(1),
            "<script>alert(1)</script>".to_string(),
            "Tech".to_string(),
            UserId(1),
        );

        let html = clients_body(&[&client], None, false);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_clients_body_marks_selection() {
        let a = Client::new(ClientId(1), "A".to_string(), "X".to_string(), UserId(1));
        let b = Client::new(ClientId(2), "B".to_string(), "Y".to_string(), UserId(1));

        let html = clients_body(&[&a, &b], Some(&a), true);
        assert!(html.contains("/clients/clear"));
        assert!(html.contains("/clients/2/select"));
        assert!(html.contains("New client"));
    }
}
