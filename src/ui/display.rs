//! Display functions for registry answers and bundle reports

use std::collections::BTreeMap;
use std::io::{self, Write};

use console::Style;

use crate::bundle::BundleReport;
use crate::error::Result;
use crate::macho::MachOInfo;
use crate::registry::{ApplicationInfo, BundleId, ExtensionInfo};

fn label(text: &str) -> console::StyledObject<&str> {
    Style::new().bold().apply_to(text)
}

/// Print an application's extensions
pub fn print_extensions(bundle_id: &BundleId, extensions: &[ExtensionInfo]) -> Result<()> {
    write_extensions(&mut io::stdout().lock(), bundle_id, extensions)?;
    Ok(())
}

pub fn write_extensions(
    out: &mut impl Write,
    bundle_id: &BundleId,
    extensions: &[ExtensionInfo],
) -> io::Result<()> {
    if extensions.is_empty() {
        writeln!(out, "No extensions registered for {bundle_id}.")?;
        return Ok(());
    }

    writeln!(out, "Extensions of {} ({}):", bundle_id, extensions.len())?;
    writeln!(out)?;

    for ext in extensions {
        writeln!(out, "  {}", Style::new().bold().yellow().apply_to(&ext.id))?;
        writeln!(out, "    {} {}", label("Path:"), ext.path)?;
        writeln!(
            out,
            "    {} {}",
            label("Executable:"),
            Style::new().cyan().apply_to(&ext.executable)
        )?;
        writeln!(out, "    {} {}", label("Absolute path:"), ext.absolute_path)?;
        writeln!(out)?;
    }

    Ok(())
}

/// Print registered applications
pub fn print_applications(applications: &[ApplicationInfo]) -> Result<()> {
    write_applications(&mut io::stdout().lock(), applications)?;
    Ok(())
}

pub fn write_applications(out: &mut impl Write, applications: &[ApplicationInfo]) -> io::Result<()> {
    if applications.is_empty() {
        writeln!(out, "No applications registered.")?;
        return Ok(());
    }

    writeln!(out, "Registered applications ({}):", applications.len())?;
    writeln!(out)?;

    for app in applications {
        let name = if app.name.is_empty() {
            &app.identifier
        } else {
            &app.name
        };

        writeln!(
            out,
            "  {} {}",
            Style::new().bold().yellow().apply_to(name),
            Style::new().dim().apply_to(format!("({})", app.identifier))
        )?;

        match (app.version.is_empty(), app.build.is_empty()) {
            (false, false) => writeln!(out, "    {} {} ({})", label("Version:"), app.version, app.build)?,
            (false, true) => writeln!(out, "    {} {}", label("Version:"), app.version)?,
            (true, false) => writeln!(out, "    {} ({})", label("Version:"), app.build)?,
            (true, true) => {}
        }

        if !app.path.is_empty() {
            writeln!(out, "    {} {}", label("Path:"), app.path)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Print the outcome of a bundle scan
pub fn print_bundle_report(bundle_id: &BundleId, report: &BundleReport) -> Result<()> {
    write_bundle_report(&mut io::stdout().lock(), bundle_id, report)?;
    Ok(())
}

pub fn write_bundle_report(
    out: &mut impl Write,
    bundle_id: &BundleId,
    report: &BundleReport,
) -> io::Result<()> {
    if let Some(cleanup) = &report.cleanup {
        writeln!(out, "{} {} entries", label("Cleaned:"), cleanup.removed.len())?;
        for path in &cleanup.removed {
            writeln!(out, "  - {}", Style::new().dim().apply_to(path.display()))?;
        }
        writeln!(out)?;
    }

    let split = &report.binaries;
    if split.is_empty() {
        writeln!(out, "No encrypted binaries found in {}.", report.bundle_dir.display())?;
        return Ok(());
    }

    writeln!(out, "Encrypted binaries ({}):", split.len())?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {}",
        Style::new().bold().yellow().apply_to(bundle_id),
        Style::new().dim().apply_to("(app)")
    )?;
    write_binary_group(out, &split.app)?;

    for (id, binaries) in &split.extensions {
        writeln!(
            out,
            "  {} {}",
            Style::new().bold().yellow().apply_to(id),
            Style::new().dim().apply_to("(extension)")
        )?;
        write_binary_group(out, binaries)?;
    }

    for path in &split.unassigned_executables {
        writeln!(
            out,
            "{} {} is not inside any registered extension",
            Style::new().yellow().bold().apply_to("Warning:"),
            path.display()
        )?;
    }

    Ok(())
}

fn write_binary_group(out: &mut impl Write, binaries: &BTreeMap<String, MachOInfo>) -> io::Result<()> {
    if binaries.is_empty() {
        writeln!(out, "    {}", Style::new().dim().apply_to("None"))?;
    }

    for (path, info) in binaries {
        writeln!(
            out,
            "    {} {} cryptid={} offset={:#x} size={:#x}",
            Style::new().cyan().apply_to(path),
            Style::new().dim().apply_to(info.file_type_name()),
            info.crypt_id,
            info.crypt_offset,
            info.crypt_size
        )?;
    }
    writeln!(out)
}
