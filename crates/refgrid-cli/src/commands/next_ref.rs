//! Next-ref command - increment a reference identifier.

use refgrid::increment_reference_str;

pub fn run(reference: String) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", increment_reference_str(&reference)?);
    Ok(())
}
