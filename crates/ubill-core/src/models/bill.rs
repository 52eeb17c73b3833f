//! Bill record data model.
//!
//! Field names match the extraction schema exactly (including the
//! historical `sactionedload` spelling), so the serialized record is the
//! three-key structure consumers store directly.

use serde::{Deserialize, Serialize};

/// A fully assembled bill record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillRecord {
    /// Contract and tariff-rate data, plus derived billing-period timestamps.
    pub staticinformation: StaticInformation,

    /// Metered consumption, demand, and ToD-zone readings.
    pub consumptioninformation: ConsumptionInformation,

    /// Charges, rebates, and the total bill amount.
    pub commercials: Commercials,
}

/// Contract and rate fields, with derived epoch timestamps for the billing
/// period. Timestamps are seconds at UTC midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StaticInformation {
    pub billdate: i64,
    pub billdatestart: i64,
    pub billdateend: i64,
    pub sactionedload: f64,
    pub connectedload: f64,
    pub contractdemand: f64,
    pub feedervoltage: f64,
    pub percent_of_contractdemand: f64,
    pub industrialconsumptionrate: f64,
    pub residentialconsumptionrate: f64,
    pub commercialconsumptionrate: f64,
    pub wheelingchargesrate: f64,
    pub fac: f64,
    pub todratezone1: f64,
    pub todratezone2: f64,
    pub todratezone3: f64,
    pub todratezone4: f64,
    pub totalconsumeunitrate: f64,
    pub demandrate: f64,
}

/// Consumption, demand, and ToD-zone readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsumptionInformation {
    pub kwhcurrentindustrial: f64,
    pub kwhpreviousindustrial: f64,
    pub kvahcurrentindustrial: f64,
    pub kvahpreviousindustrial: f64,
    pub multiplicationfactor: f64,
    pub adjustmentunitsindustrialkwh: f64,
    pub adjustmentunitsindustrialkvah: f64,
    pub kwhconsumptionindustrial: f64,
    pub kvahconsumptionindustrial: f64,
    pub kvahconsumptioncommercial: f64,
    pub kwhconsumptionresidential: f64,
    pub kwtotal: f64,
    pub kvatotal: f64,
    pub billeddemand: f64,
    pub billedpf: f64,
    pub todconsumptionzone1: f64,
    pub todconsumptionzone2: f64,
    pub todconsumptionzone3: f64,
    pub todconsumptionzone4: f64,
    pub todconsumptionzone5: f64,
    pub todconsumptionzone6: f64,
    pub todconsumptionzone7: f64,
    pub todconsumptionzone8: f64,
    pub loadfactor: f64,
    pub toddemandzone1: f64,
    pub toddemandzone2: f64,
    pub toddemandzone3: f64,
    pub toddemandzone4: f64,
    pub totalconsumedunits: f64,
    pub pfbaseline: f64,
    pub loadfactorbaseline: f64,
}

impl Default for ConsumptionInformation {
    fn default() -> Self {
        Self {
            kwhcurrentindustrial: 0.0,
            kwhpreviousindustrial: 0.0,
            kvahcurrentindustrial: 0.0,
            kvahpreviousindustrial: 0.0,
            multiplicationfactor: 0.0,
            adjustmentunitsindustrialkwh: 0.0,
            adjustmentunitsindustrialkvah: 0.0,
            kwhconsumptionindustrial: 0.0,
            kvahconsumptionindustrial: 0.0,
            kvahconsumptioncommercial: 0.0,
            kwhconsumptionresidential: 0.0,
            kwtotal: 0.0,
            kvatotal: 0.0,
            billeddemand: 0.0,
            billedpf: 0.0,
            todconsumptionzone1: 0.0,
            todconsumptionzone2: 0.0,
            todconsumptionzone3: 0.0,
            todconsumptionzone4: 0.0,
            todconsumptionzone5: 0.0,
            todconsumptionzone6: 0.0,
            todconsumptionzone7: 0.0,
            todconsumptionzone8: 0.0,
            loadfactor: 0.0,
            toddemandzone1: 0.0,
            toddemandzone2: 0.0,
            toddemandzone3: 0.0,
            toddemandzone4: 0.0,
            totalconsumedunits: 0.0,
            // Constant baselines, independent of the input document.
            pfbaseline: 1.0,
            loadfactorbaseline: 0.0,
        }
    }
}

/// Charge, rebate, tax, and total fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Commercials {
    pub industrialconsumptioncharge: f64,
    pub commercialconsumptioncharge: f64,
    pub residentialconsumptioncharge: f64,
    pub totalenergyconsumptioncharge: f64,
    pub demandcharges: f64,
    pub wheelingcharges: f64,
    pub faccharge: f64,
    pub todchargeszone1: f64,
    pub todchargeszone2: f64,
    pub todchargeszone3: f64,
    pub todchargeszone4: f64,
    pub pfrebate: f64,
    pub electricityduty: f64,
    pub bulkconsumptionrebate: f64,
    pub incrementalconsumptionrebate: f64,
    pub demandpenalty: f64,
    pub taxonsale: f64,
    pub tcs: f64,
    pub totalbillamount: f64,
}
