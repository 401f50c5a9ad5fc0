//! Common regex patterns for Spanish electricity invoices.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Currency amount in Spanish formatting: optional sign, periods as
    // thousands separators, comma decimal separator, two decimals, euro
    // sign with optional space. The euro suffix is what anchors the match
    // on lines that also carry kW readings, day counts and unit prices.
    pub static ref AMOUNT: Regex = Regex::new(
        r"[+-]?(?:\d{1,3}(?:\.\d{3})*|\d+),\d{2} ?€"
    ).unwrap();

    // A whole token that is a plain Spanish-formatted number, as printed
    // in the consumption columns of the tariff tables.
    pub static ref NUMBER_TOKEN: Regex = Regex::new(
        r"^[+-]?(?:\d{1,3}(?:\.\d{3})*|\d+),\d{2}$"
    ).unwrap();

    // Date token as printed on every supported invoice.
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4}"
    ).unwrap();

    // Endesa meter-register code printed between the tariff label and the
    // numeric columns, e.g. `1.18.4`.
    pub static ref METER_CODE: Regex = Regex::new(
        r"^1\.18\.[1-6]$"
    ).unwrap();
}
