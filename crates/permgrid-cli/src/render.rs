//! Console rendering of matrix state and verdicts.
//!
//! The matrix engine returns structured values; everything printable is
//! produced here. Tables are tab-separated with sorted users as rows and
//! sorted catalog file names as columns.

use console::style;

use permgrid_core::AccessRequest;
use permgrid_matrix::{AccessVerdict, MatrixStore};

/// Render the matrix as a tab-separated table.
///
/// Header row lists the catalog's file names; each user row holds the
/// canonical permission string per file, with an empty cell where the
/// user has no entry.
pub fn render_matrix(store: &MatrixStore) -> String {
    let files: Vec<_> = store.catalog().files().collect();

    let mut out = String::new();
    out.push('\t');
    out.push_str(
        &files
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join("\t"),
    );
    out.push('\n');

    for (user, _) in store.users() {
        let mut row = vec![user.as_str().to_string()];
        for file in &files {
            let cell = store
                .permissions_for(user, file)
                .map(|p| p.encode())
                .unwrap_or_default();
            row.push(cell);
        }
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

/// Render each user's chain in encounter order.
///
/// One line per user: `User= alice : f1:rw -> f2:o -> |/|`, with `|/|`
/// marking the end of the chain.
pub fn render_access_lists(store: &MatrixStore) -> String {
    let mut out = String::from("ACL:\n");
    for (user, chain) in store.users() {
        let links: Vec<String> = chain
            .iter()
            .map(|entry| format!("{}:{}", entry.file_name, entry.permissions))
            .collect();
        out.push_str(&format!("User= {} : {} -> |/|\n", user, links.join(" -> ")));
    }
    out
}

/// Render one evaluated request as a console line.
pub fn render_verdict(request: &AccessRequest, verdict: AccessVerdict) -> String {
    match verdict {
        AccessVerdict::Permit => format!(
            "{},{},{}: {}",
            request.user,
            request.file,
            request.permissions,
            style("PERMIT").green()
        ),
        AccessVerdict::Deny => format!(
            "{},{},{}: {}",
            request.user,
            request.file,
            request.permissions,
            style("DENY").red()
        ),
        AccessVerdict::UnknownUser => "User does not exist.".to_string(),
        AccessVerdict::UnknownFile => "File does not exist.".to_string(),
    }
}
