pub mod edge;
pub mod graph_factory;
pub mod indexed_graph;
pub mod persistence;

pub type VertexId = u32;
pub type EdgeId = u32;
pub type Weight = f64;
pub type Rank = u32;

/// A `[longitude, latitude]` pair.
pub type Coordinate = [f64; 2];

/// Builds the `"lng,lat"` key geographic callers use to identify nodes.
pub fn coordinate_key(coordinate: &Coordinate) -> String {
    format!("{},{}", coordinate[0], coordinate[1])
}

/// Inverse of [`coordinate_key`]. Returns `None` for keys that are not a
/// pair of numbers.
pub fn parse_coordinate_key(key: &str) -> Option<Coordinate> {
    let (lng, lat) = key.split_once(',')?;
    let lng = lng.trim().parse().ok()?;
    let lat = lat.trim().parse().ok()?;
    Some([lng, lat])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_keys() {
        let key = coordinate_key(&[-122.5, 37.25]);
        assert_eq!(key, "-122.5,37.25");
        assert_eq!(parse_coordinate_key(&key), Some([-122.5, 37.25]));
        assert_eq!(parse_coordinate_key("A"), None);
        assert_eq!(parse_coordinate_key("1,b"), None);
    }
}
