//! Two-phase grouping: products are first pushed into per-key accumulators,
//! then each accumulator is finalized into an output statistics struct.

use crate::report::{IssuerCount, IssuerStats, MonthlyStats, PartitionStats};
use core_types::{Country, Currency, Product, ProductType, RiskLevel};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Running totals for one group of products.
#[derive(Debug, Default)]
pub(crate) struct GroupAccumulator<'a> {
    pub count: usize,
    pub total_value: Decimal,
    pub countries: BTreeSet<Country>,
    pub currencies: BTreeSet<Currency>,
    pub product_types: BTreeSet<ProductType>,
    pub risk_distribution: BTreeMap<RiskLevel, usize>,
    pub issuers: IssuerTally<'a>,
    coupon_sum: Decimal,
    coupon_count: usize,
}

impl<'a> GroupAccumulator<'a> {
    pub fn push(&mut self, product: &'a Product) {
        self.count += 1;
        self.total_value += product.nominal_value();
        self.countries.insert(product.country());
        self.currencies.insert(product.currency());
        self.product_types.insert(product.product_type());
        *self.risk_distribution.entry(product.risk_level()).or_insert(0) += 1;
        self.issuers.push(product.issuer());

        if let Some(rate) = product.coupon_rate() {
            self.coupon_sum += rate;
            self.coupon_count += 1;
        }
    }

    /// Mean nominal value. Accumulators are only created for non-empty
    /// groups, but a zero count still yields zero rather than a panic.
    pub fn average_value(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        self.total_value / Decimal::from(self.count)
    }

    /// Mean coupon over products that carry one.
    pub fn average_coupon(&self) -> Option<Decimal> {
        if self.coupon_count == 0 {
            return None;
        }
        Some(self.coupon_sum / Decimal::from(self.coupon_count))
    }

    pub fn partition_stats(&self) -> PartitionStats {
        PartitionStats {
            count: self.count,
            total_value: self.total_value,
            average_value: self.average_value(),
            risk_distribution: self.risk_distribution.clone(),
        }
    }

    pub fn monthly_stats(&self) -> MonthlyStats {
        MonthlyStats {
            count: self.count,
            total_value: self.total_value,
            average_value: self.average_value(),
            countries: self.countries.clone(),
            currencies: self.currencies.clone(),
        }
    }

    pub fn issuer_stats(&self, issuer: &str) -> IssuerStats {
        IssuerStats {
            issuer: issuer.to_string(),
            count: self.count,
            total_value: self.total_value,
            average_value: self.average_value(),
            countries: self.countries.clone(),
            currencies: self.currencies.clone(),
            product_types: self.product_types.clone(),
        }
    }
}

/// Issuer occurrence counts in first-seen order.
#[derive(Debug, Default)]
pub(crate) struct IssuerTally<'a> {
    counts: Vec<(&'a str, usize)>,
    index: HashMap<&'a str, usize>,
}

impl<'a> IssuerTally<'a> {
    pub fn push(&mut self, issuer: &'a str) {
        match self.index.get(issuer) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(issuer, self.counts.len());
                self.counts.push((issuer, 1));
            }
        }
    }

    /// The `limit` most frequent issuers. The sort is stable, so issuers with
    /// equal counts keep their first-seen order.
    pub fn top(&self, limit: usize) -> Vec<IssuerCount> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
            .into_iter()
            .take(limit)
            .map(|(issuer, count)| IssuerCount {
                issuer: issuer.to_string(),
                count,
            })
            .collect()
    }
}

/// Groups products by an ordered key. Keys with no products never appear.
pub(crate) fn group_by<'a, K, F>(products: &'a [Product], key: F) -> BTreeMap<K, GroupAccumulator<'a>>
where
    K: Ord,
    F: Fn(&Product) -> K,
{
    let mut groups: BTreeMap<K, GroupAccumulator<'a>> = BTreeMap::new();
    for product in products {
        groups.entry(key(product)).or_default().push(product);
    }
    groups
}

/// Groups products by exact issuer string, keeping first-seen issuer order.
pub(crate) fn group_by_issuer(products: &[Product]) -> Vec<(&str, GroupAccumulator<'_>)> {
    let mut groups: Vec<(&str, GroupAccumulator<'_>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for product in products {
        let issuer = product.issuer();
        let slot = *index.entry(issuer).or_insert_with(|| {
            groups.push((issuer, GroupAccumulator::default()));
            groups.len() - 1
        });
        groups[slot].1.push(product);
    }
    groups
}
