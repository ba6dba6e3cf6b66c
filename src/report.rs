// Fixed-width text tables for records and totals

use crate::models::{PropertyRecord, VehicleRecord};
use crate::record::Taxable;
use crate::service::Summary;
use std::io::{self, Write};

const NARROW_RULE: &str = "+--------------------------------------------------+";
const WIDE_RULE: &str = "+---------------------------------------------------------------------+";

pub fn write_property_table<W: Write>(out: &mut W, properties: &[PropertyRecord]) -> io::Result<()> {
    writeln!(out, "\n{}", NARROW_RULE)?;
    writeln!(
        out,
        "{:>5} {:>15} {:>10} {:>10} {:>10}",
        "ID", "BuiltupArea", "Baseprice", "In City", "Property Tax"
    )?;
    writeln!(out, "{}", NARROW_RULE)?;
    write_rows(out, properties)
}

pub fn write_vehicle_table<W: Write>(out: &mut W, vehicles: &[VehicleRecord]) -> io::Result<()> {
    writeln!(out, "\n{}", WIDE_RULE)?;
    writeln!(
        out,
        "{:>5} {:>15} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "RegNo", "Brand", "Velocity", "Seats", "Fuel Type", "Price", "Tax"
    )?;
    writeln!(out, "{}", WIDE_RULE)?;
    write_rows(out, vehicles)
}

fn write_rows<W: Write, T: Taxable>(out: &mut W, records: &[T]) -> io::Result<()> {
    for record in records {
        writeln!(out, "{}", record.describe())?;
    }
    Ok(())
}

/// Counts and tax per record kind, plus the grand total
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "\n{}", NARROW_RULE)?;
    writeln!(out, "{:>5} {:>15} {:>10} {:>10}", "SR No", "Particular", "Quantity", "Tax")?;
    writeln!(out, "{}", NARROW_RULE)?;
    writeln!(
        out,
        "{:>5} {:>15} {:>10} {:>10.2}",
        1, "Properties", summary.property_count, summary.property_tax
    )?;
    writeln!(
        out,
        "{:>5} {:>15} {:>10} {:>10.2}",
        2, "Vehicles", summary.vehicle_count, summary.vehicle_tax
    )?;
    writeln!(
        out,
        "{:>5} {:>15} {:>10} {:>10.2}",
        "",
        "Total",
        summary.total_count(),
        summary.total_tax()
    )?;
    writeln!(out, "{}", NARROW_RULE)?;
    Ok(())
}
