use anyhow::Result;
use serde::Serialize;

use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub required: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

const TOOLS: [(&str, bool, &str); 4] = [
    ("cargo", true, "required to install generators and build programs"),
    ("shank", false, "optional (installed into the binary install dir on demand)"),
    ("anchor", false, "optional (required for the anchor generator)"),
    ("solana", false, "optional (required to deploy programs)"),
];

pub async fn run() -> Result<()> {
    let checks: Vec<Check> = TOOLS
        .iter()
        .map(|(name, required, detail)| Check {
            name: name.to_string(),
            ok: which_ok(name),
            required: *required,
            detail: detail.to_string(),
        })
        .collect();

    let ok = checks.iter().all(|c| c.ok || !c.required);
    output::print(&DoctorOut { ok, checks })?;
    Ok(())
}

fn which_ok(cmd: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|p| {
        if p.join(cmd).is_file() {
            return true;
        }
        cfg!(windows) && p.join(format!("{cmd}.exe")).is_file()
    })
}
