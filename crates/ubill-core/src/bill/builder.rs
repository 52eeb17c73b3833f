//! Bill record assembly from raw extraction fields.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::models::bill::{BillRecord, Commercials, ConsumptionInformation, StaticInformation};
use crate::normalize::{normalize_bill_month, normalize_date, normalize_number};

use super::Result;
use crate::error::BillError;

/// Raw field name to raw string value, as produced by the document-analysis
/// service. A present key with a `None` value means the field was detected
/// but carried no text.
pub type RawFieldMap = HashMap<String, Option<String>>;

/// Total-consumption source fields, highest priority first. The first
/// nonzero value wins; a genuine zero at a higher-priority field is
/// overridden by a later nonzero one.
const CONSUMPTION_PRIORITY: [&str; 4] = [
    "kvahconsumptionindustrial",
    "kwhconsumptionindustrial",
    "totalconsumptionkvah",
    "totalconsumptionkwh",
];

/// Assembles the three-part bill record from a raw field map.
///
/// Numeric fields that are absent or fail normalization default to `0.00`
/// and never abort the build. The bill date and bill month are required:
/// every derived timestamp depends on them, so their failure is fatal.
pub struct BillRecordBuilder;

impl BillRecordBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a bill record from raw extraction fields.
    pub fn build(&self, fields: &RawFieldMap) -> Result<BillRecord> {
        let bill_date = normalize_date(required(fields, "billdate")?)?;
        let bill_month = normalize_bill_month(required(fields, "billmonth")?)?;
        debug!(billdate = %bill_date, billmonth = %bill_month, "normalized billing period");

        let values = normalize_numeric_fields(fields);
        let get = |name: &str| values.get(name).copied().unwrap_or(0.0);

        let totalconsumedunits = CONSUMPTION_PRIORITY
            .into_iter()
            .map(|name| get(name))
            .find(|value| *value != 0.0)
            .unwrap_or(0.0);

        let commercials = Commercials {
            industrialconsumptioncharge: get("industrialconsumptioncharge"),
            commercialconsumptioncharge: get("commercialconsumptioncharge"),
            residentialconsumptioncharge: get("residentialconsumptioncharge"),
            totalenergyconsumptioncharge: get("industrialconsumptioncharge")
                + get("commercialconsumptioncharge")
                + get("residentialconsumptioncharge"),
            demandcharges: get("demandcharges"),
            wheelingcharges: get("wheelingcharges"),
            faccharge: get("faccharge"),
            todchargeszone1: get("todchargeszone1"),
            todchargeszone2: get("todchargeszone2"),
            todchargeszone3: get("todchargeszone3"),
            todchargeszone4: get("todchargeszone4"),
            pfrebate: get("pfrebate"),
            electricityduty: get("electricityduty"),
            bulkconsumptionrebate: get("bulkconsumptionrebate"),
            incrementalconsumptionrebate: get("incrementalconsumptionrebate"),
            demandpenalty: get("demandpenalty"),
            taxonsale: get("taxonsale"),
            tcs: get("tcs"),
            totalbillamount: get("totalbillamount"),
        };

        let consumptioninformation = ConsumptionInformation {
            kwhcurrentindustrial: get("kwhcurrentindustrial"),
            kwhpreviousindustrial: get("kwhpreviousindustrial"),
            kvahcurrentindustrial: get("kvahcurrentindustrial"),
            kvahpreviousindustrial: get("kvahpreviousindustrial"),
            multiplicationfactor: get("multiplicationfactor"),
            adjustmentunitsindustrialkwh: get("adjustmentunitsindustrialkwh"),
            adjustmentunitsindustrialkvah: get("adjustmentunitsindustrialkvah"),
            kwhconsumptionindustrial: get("kwhconsumptionindustrial"),
            kvahconsumptionindustrial: get("kvahconsumptionindustrial"),
            // The crossed kwh/kvah source naming is the extraction model's.
            kvahconsumptioncommercial: get("assessedconsumptionkwh"),
            kwhconsumptionresidential: get("assessedconsumptionkvah"),
            kwtotal: get("kwtotal"),
            kvatotal: get("kvatotal"),
            billeddemand: get("billeddemand"),
            billedpf: get("billedpf"),
            todconsumptionzone1: get("todconsumptionzone1"),
            todconsumptionzone2: get("todconsumptionzone2"),
            todconsumptionzone3: get("todconsumptionzone3"),
            todconsumptionzone4: get("todconsumptionzone4"),
            todconsumptionzone5: get("todconsumptionzone5"),
            todconsumptionzone6: get("todconsumptionzone6"),
            todconsumptionzone7: get("todconsumptionzone7"),
            todconsumptionzone8: get("todconsumptionzone8"),
            loadfactor: get("loadfactor"),
            toddemandzone1: get("toddemandzone1"),
            toddemandzone2: get("toddemandzone2"),
            toddemandzone3: get("toddemandzone3"),
            toddemandzone4: get("toddemandzone4"),
            totalconsumedunits,
            pfbaseline: 1.0,
            loadfactorbaseline: 0.0,
        };

        let demandrate = if consumptioninformation.billeddemand != 0.0 {
            round2(commercials.demandcharges / consumptioninformation.billeddemand)
        } else {
            0.0
        };

        let staticinformation = StaticInformation {
            billdate: epoch_midnight(bill_date),
            billdatestart: epoch_midnight(bill_month.first_day()),
            billdateend: epoch_midnight(bill_month.last_day()),
            sactionedload: get("sactionedload"),
            connectedload: get("connectedload"),
            contractdemand: get("contractdemand"),
            feedervoltage: get("feedervoltage"),
            percent_of_contractdemand: get("percent_of_contractdemand"),
            industrialconsumptionrate: get("industrialconsumptionrate"),
            residentialconsumptionrate: get("residentialconsumptionrate"),
            commercialconsumptionrate: get("commercialconsumptionrate"),
            wheelingchargesrate: get("wheelingchargesrate"),
            fac: get("facrate"),
            todratezone1: get("todratezone1"),
            todratezone2: get("todratezone2"),
            todratezone3: get("todratezone3"),
            todratezone4: get("todratezone4"),
            totalconsumeunitrate: get("industrialconsumptionrate")
                + get("residentialconsumptionrate")
                + get("commercialconsumptionrate"),
            demandrate,
        };

        Ok(BillRecord {
            staticinformation,
            consumptioninformation,
            commercials,
        })
    }
}

impl Default for BillRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn required<'a>(fields: &'a RawFieldMap, name: &str) -> Result<&'a str> {
    fields
        .get(name)
        .and_then(|value| value.as_deref())
        .ok_or_else(|| BillError::MissingField(name.to_string()))
}

/// Run every non-date field through the numeric normalizer. Fields that are
/// absent or fail to normalize are left out of the map and default to `0.00`
/// at assembly.
fn normalize_numeric_fields(fields: &RawFieldMap) -> HashMap<&str, f64> {
    let mut values = HashMap::new();

    for (name, raw) in fields {
        if name == "billdate" || name == "billmonth" {
            continue;
        }

        match normalize_number(raw.as_deref()) {
            Ok(Some(value)) => {
                values.insert(name.as_str(), value);
            }
            Ok(None) => {}
            Err(err) => {
                debug!(field = %name, %err, "numeric normalization failed; field defaults to 0.00");
            }
        }
    }

    values
}

fn epoch_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raw(entries: &[(&str, &str)]) -> RawFieldMap {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), Some(value.to_string())))
            .collect()
    }

    fn minimal() -> RawFieldMap {
        raw(&[("billdate", "29-JUN-2024"), ("billmonth", "JUN-2024")])
    }

    #[test]
    fn test_minimal_record_defaults() {
        let record = BillRecordBuilder::new().build(&minimal()).unwrap();

        assert_eq!(record.commercials, Commercials::default());
        assert_eq!(
            record.consumptioninformation,
            ConsumptionInformation::default()
        );

        let expected = StaticInformation {
            billdate: record.staticinformation.billdate,
            billdatestart: record.staticinformation.billdatestart,
            billdateend: record.staticinformation.billdateend,
            ..Default::default()
        };
        assert_eq!(record.staticinformation, expected);
    }

    #[test]
    fn test_billing_period_timestamps() {
        let record = BillRecordBuilder::new().build(&minimal()).unwrap();

        // 2024-06-29, 2024-06-01, 2024-06-30, all at UTC midnight.
        assert_eq!(record.staticinformation.billdate, 1_719_619_200);
        assert_eq!(record.staticinformation.billdatestart, 1_717_200_000);
        assert_eq!(record.staticinformation.billdateend, 1_719_705_600);
    }

    #[test]
    fn test_leap_year_month_span() {
        let mut fields = minimal();
        fields.insert("billmonth".to_string(), Some("FEB-2024".to_string()));
        let record = BillRecordBuilder::new().build(&fields).unwrap();

        // Feb 1 through Feb 29, 2024.
        assert_eq!(record.staticinformation.billdatestart, 1_706_745_600);
        assert_eq!(record.staticinformation.billdateend, 1_709_164_800);
        assert_eq!(
            record.staticinformation.billdateend - record.staticinformation.billdatestart,
            28 * 86_400
        );
    }

    #[test]
    fn test_consumption_priority_zero_override() {
        let mut fields = minimal();
        fields.extend(raw(&[
            ("kvahconsumptionindustrial", "0"),
            ("kwhconsumptionindustrial", "150"),
        ]));

        let record = BillRecordBuilder::new().build(&fields).unwrap();
        assert_eq!(record.consumptioninformation.totalconsumedunits, 150.0);
    }

    #[test]
    fn test_consumption_priority_first_nonzero_wins() {
        let mut fields = minimal();
        fields.extend(raw(&[
            ("kvahconsumptionindustrial", "320.5"),
            ("totalconsumptionkwh", "999"),
        ]));

        let record = BillRecordBuilder::new().build(&fields).unwrap();
        assert_eq!(record.consumptioninformation.totalconsumedunits, 320.5);
    }

    #[test]
    fn test_consumption_all_absent_is_zero() {
        let record = BillRecordBuilder::new().build(&minimal()).unwrap();
        assert_eq!(record.consumptioninformation.totalconsumedunits, 0.0);
    }

    #[test]
    fn test_total_energy_consumption_charge_sum() {
        let mut fields = minimal();
        fields.extend(raw(&[
            ("industrialconsumptioncharge", "1,000.50"),
            ("residentialconsumptioncharge", "249.50"),
        ]));

        let record = BillRecordBuilder::new().build(&fields).unwrap();
        assert_eq!(record.commercials.industrialconsumptioncharge, 1000.5);
        assert_eq!(record.commercials.commercialconsumptioncharge, 0.0);
        assert_eq!(record.commercials.totalenergyconsumptioncharge, 1250.0);
    }

    #[test]
    fn test_demand_rate() {
        let mut fields = minimal();
        fields.extend(raw(&[("demandcharges", "1000"), ("billeddemand", "300")]));

        let record = BillRecordBuilder::new().build(&fields).unwrap();
        assert_eq!(record.staticinformation.demandrate, 3.33);
    }

    #[test]
    fn test_demand_rate_zero_demand_guard() {
        let mut fields = minimal();
        fields.insert("demandcharges".to_string(), Some("51217.00".to_string()));

        let record = BillRecordBuilder::new().build(&fields).unwrap();
        assert_eq!(record.staticinformation.demandrate, 0.0);
    }

    #[test]
    fn test_total_consume_unit_rate() {
        let mut fields = minimal();
        fields.extend(raw(&[
            ("industrialconsumptionrate", "7.25"),
            ("commercialconsumptionrate", "2.50"),
        ]));

        let record = BillRecordBuilder::new().build(&fields).unwrap();
        assert_eq!(record.staticinformation.totalconsumeunitrate, 9.75);
    }

    #[test]
    fn test_assessed_consumption_mapping() {
        let mut fields = minimal();
        fields.extend(raw(&[
            ("assessedconsumptionkwh", "12.5"),
            ("assessedconsumptionkvah", "14.5"),
        ]));

        let record = BillRecordBuilder::new().build(&fields).unwrap();
        assert_eq!(record.consumptioninformation.kvahconsumptioncommercial, 12.5);
        assert_eq!(record.consumptioninformation.kwhconsumptionresidential, 14.5);
    }

    #[test]
    fn test_invalid_numeric_field_absorbed() {
        let mut fields = minimal();
        fields.insert("sactionedload".to_string(), Some("n/a".to_string()));
        fields.insert("connectedload".to_string(), None);

        let record = BillRecordBuilder::new().build(&fields).unwrap();
        assert_eq!(record.staticinformation.sactionedload, 0.0);
        assert_eq!(record.staticinformation.connectedload, 0.0);
    }

    #[test]
    fn test_missing_bill_date_is_fatal() {
        let mut fields = minimal();
        fields.remove("billdate");

        let err = BillRecordBuilder::new().build(&fields).unwrap_err();
        assert!(matches!(err, BillError::MissingField(name) if name == "billdate"));
    }

    #[test]
    fn test_malformed_bill_month_is_fatal() {
        let mut fields = minimal();
        fields.insert("billmonth".to_string(), Some("??".to_string()));

        let err = BillRecordBuilder::new().build(&fields).unwrap_err();
        assert!(matches!(err, BillError::Normalize(_)));
    }
}
