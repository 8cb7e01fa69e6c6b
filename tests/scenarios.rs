use chartgrid::descriptor::{DescriptorRegistry, PropertyFilter, Value};
use chartgrid::mapping::{ColumnMapping, ColumnNames, column_property};
use chartgrid::series::{DataPoint, Item, ItemKind};

fn property_names(registry: &DescriptorRegistry, filters: &[PropertyFilter]) -> Vec<String> {
    registry
        .install::<DataPoint>()
        .filtered(filters)
        .iter()
        .map(|p| p.name().to_string())
        .collect()
}

#[test]
fn point_type_lists_x_then_y() {
    let registry = DescriptorRegistry::with_default_converters();
    assert_eq!(property_names(&registry, &[]), ["X", "Y"]);
    // Repeated queries keep the order.
    assert_eq!(property_names(&registry, &[PropertyFilter::Browsable]), ["X", "Y"]);
}

#[test]
fn hiding_one_property_excludes_only_that_one() {
    let registry = DescriptorRegistry::with_default_converters();
    let descriptor = registry.install::<DataPoint>();
    descriptor.property("X").unwrap().set_browsable(false);
    assert_eq!(property_names(&registry, &[PropertyFilter::Browsable]), ["Y"]);
    assert_eq!(property_names(&registry, &[]), ["X", "Y"]);
}

#[test]
fn mapped_price_column_feeds_x() {
    let registry = DescriptorRegistry::with_default_converters();
    let names = ColumnNames::new();
    names.replace(vec!["Date".into(), "Price".into()]);

    let mut mapping = ColumnMapping::new();
    let x = column_property("X", names);
    x.set(&mut mapping, Value::Text("Price".into())).unwrap();
    assert_eq!(x.get(&mapping).unwrap(), Value::Text("Price".into()));

    mapping.set("Y", "Date");
    let columns = ["Date".to_string(), "Price".to_string()];
    let cells = ["7".to_string(), "3.14".to_string()];
    let item = ItemKind::DataPoint
        .from_row(&registry, &mapping, &columns, &cells)
        .unwrap();
    assert_eq!(item, Item::Point(DataPoint { x: 3.14, y: 7.0 }));
}

#[test]
fn unmapped_synthetic_property_reads_empty() {
    let x = column_property("X", ColumnNames::new());
    let mapping = ColumnMapping::new();
    assert_eq!(x.get(&mapping).unwrap(), Value::Empty);
    assert_eq!(x.category(), "Columns");
}

#[test]
fn blank_first_cell_skips_the_row_even_when_mapped() {
    let registry = DescriptorRegistry::with_default_converters();
    let mut mapping = ColumnMapping::new();
    mapping.set("X", "Price");
    mapping.set("Y", "Volume");
    let columns = ["Date".to_string(), "Price".to_string(), "Volume".to_string()];
    let cells = [" ".to_string(), "3.5".to_string(), "10".to_string()];
    assert_eq!(
        ItemKind::DataPoint.from_row(&registry, &mapping, &columns, &cells),
        None
    );
}
