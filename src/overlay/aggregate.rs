use std::{collections::BTreeMap, sync::Arc};

use crate::anomaly::{Anomaly, AnomalyKind};
use super::{DepartmentFragment, Departments};

/// Fragment count and area sum for one department.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DepartmentTotals {
    pub count: u32,
    pub area_km2: f64,
}

/// Group fragments by department.
///
/// Departments without fragments are absent from the result. Fragments whose
/// department is not in the canonical list are dropped and reported.
pub fn aggregate(fragments: &[DepartmentFragment], departments: &Departments, label: &str)
    -> (BTreeMap<Arc<str>, DepartmentTotals>, Vec<Anomaly>)
{
    let mut totals = BTreeMap::<Arc<str>, DepartmentTotals>::new();
    let mut anomalies = Vec::new();

    for fragment in fragments {
        let Some(name) = departments.canonical(&fragment.department) else {
            anomalies.push(Anomaly::record(
                AnomalyKind::UnknownDepartment, label, Some(fragment.source),
                format!("department {:?} is not in the department layer", fragment.department),
            ));
            continue
        };

        let entry = totals.entry(name.clone()).or_default();
        entry.count += 1;
        entry.area_km2 += fragment.area_km2;
    }

    (totals, anomalies)
}

#[cfg(test)]
mod tests {
    use geo::MultiPolygon;

    use super::*;

    fn fragment(department: &str, source: usize, area_km2: f64) -> DepartmentFragment {
        DepartmentFragment {
            department: Arc::from(department),
            source,
            geometry: MultiPolygon::new(vec![]),
            area_km2,
        }
    }

    fn departments(names: &[&str]) -> Departments {
        Departments::new(names.iter().map(|&name| (Arc::from(name), MultiPolygon::new(vec![]))).collect())
    }

    #[test]
    fn counts_fragments_and_sums_areas() {
        let fragments = [fragment("META", 0, 1.5), fragment("CAUCA", 1, 2.0), fragment("META", 2, 3.0)];
        let (totals, anomalies) = aggregate(&fragments, &departments(&["META", "CAUCA", "HUILA"]), "test");

        assert!(anomalies.is_empty());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["META"], DepartmentTotals { count: 2, area_km2: 4.5 });
        assert_eq!(totals["CAUCA"], DepartmentTotals { count: 1, area_km2: 2.0 });
        assert!(!totals.contains_key("HUILA"));
    }

    #[test]
    fn split_feature_counts_once_per_department() {
        let fragments = [fragment("META", 0, 1.0), fragment("CAUCA", 0, 1.0)];
        let (totals, _) = aggregate(&fragments, &departments(&["META", "CAUCA"]), "test");
        assert_eq!(totals["META"].count, 1);
        assert_eq!(totals["CAUCA"].count, 1);
    }

    #[test]
    fn unknown_departments_are_dropped_and_reported() {
        let fragments = [fragment("META", 0, 1.0), fragment("ATLANTIS", 1, 9.0)];
        let (totals, anomalies) = aggregate(&fragments, &departments(&["META"]), "test");
        assert_eq!(totals.len(), 1);
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].kind, AnomalyKind::UnknownDepartment);
        assert_eq!(anomalies[0].feature, Some(1));
    }
}
