// Start-up credential gate
//
// A fixed username/password pair checked once. This is a convenience gate
// for the console session and provides no security.

use crate::console::Console;
use crate::error::TaxError;
use std::io::{BufRead, Write};
use tracing::warn;

const USERNAME: &str = "admin";
const PASSWORD: &str = "admin123";

/// Show the welcome banner and check the entered credentials once
///
/// Returns `Ok(false)` on a mismatch; the caller is expected to exit.
pub fn authenticate<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<bool, TaxError> {
    console.say("+-------------------------------------+")?;
    console.say("|   WELCOME TO TAX CALCULATION APP    |")?;
    console.say("+-------------------------------------+")?;

    let username = console.prompt("USERNAME: ")?;
    let password = console.prompt("PASSWORD: ")?;

    if username == USERNAME && password == PASSWORD {
        console.success("Authentication Successful\n")?;
        Ok(true)
    } else {
        warn!(%username, "Authentication failed");
        console.say("Invalid Credentials. Exiting.")?;
        Ok(false)
    }
}
