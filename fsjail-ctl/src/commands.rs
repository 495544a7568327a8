use fsjail_core::SystemCapabilities;
use log::info;

/// Print a report of the kernel features fsjail relies on.
pub fn check_requirements() {
    info!("checking Landlock requirements");
    println!("Checking fsjail requirements...\n");

    let caps = SystemCapabilities::detect();
    println!("{}", caps.summary());

    if caps.has_landlock {
        println!("\nThis kernel can enforce fsjail rulesets.");
    } else {
        println!("\nLandlock is unavailable; fsjail cannot restrict processes here.");
    }
}
