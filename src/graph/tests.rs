//! Serialization tests with renderer-facing fixtures

use serde_json::{json, Value};

/// Fixture: the node shape the renderer consumes
fn node_fixture() -> Value {
    json!({
        "id": 1,
        "position": { "x": 120.0, "y": 80.0 },
        "adjacency": [
            { "neighbor": 2, "weight": 4, "key": "1-2" }
        ]
    })
}

#[cfg(test)]
mod serialization_tests {
    use super::*;
    use crate::graph::{EdgeKey, GraphModel, Node, NodeId, Position};

    #[test]
    fn node_id_serializes_as_number() {
        let id = NodeId::from(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn node_id_deserializes_from_number() {
        let id: NodeId = serde_json::from_str("7").unwrap();
        assert_eq!(id, NodeId::from(7));
    }

    #[test]
    fn edge_key_serializes_as_string() {
        let key = EdgeKey::new(NodeId::from(2), NodeId::from(1));
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"1-2\"");
    }

    #[test]
    fn edge_key_deserializes_from_string() {
        let key: EdgeKey = serde_json::from_str("\"1-2\"").unwrap();
        assert_eq!(key, EdgeKey::new(NodeId::from(1), NodeId::from(2)));
    }

    #[test]
    fn node_matches_fixture_shape() {
        let mut model = GraphModel::new();
        let a = model.add_node(Position::new(120.0, 80.0));
        let b = model.add_node(Position::new(0.0, 0.0));
        model.add_edge(a, b, 4).unwrap();

        let json = serde_json::to_value(model.get_node(a).unwrap()).unwrap();
        assert_eq!(json, node_fixture());
    }

    #[test]
    fn node_roundtrip() {
        let json = node_fixture();
        let node: Node = serde_json::from_value(json).unwrap();
        assert_eq!(node.id, NodeId::from(1));
        assert_eq!(node.adjacency.len(), 1);
        assert_eq!(node.adjacency[0].weight, 4);
    }

    #[test]
    fn model_roundtrip() {
        let mut model = GraphModel::new();
        let a = model.add_node(Position::new(0.0, 0.0));
        let b = model.add_node(Position::new(10.0, 10.0));
        let c = model.add_node(Position::new(20.0, 0.0));
        model.add_edge(a, b, 1).unwrap();
        model.add_edge(b, c, 2).unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let restored: GraphModel = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.node_count(), 3);
        assert_eq!(restored.edge_count(), 2);
        assert_eq!(restored.neighbors(b).unwrap().len(), 2);
        // The id counter survives, so a restored model never reuses ids.
        let mut restored = restored;
        let d = restored.add_node(Position::default());
        assert_eq!(d.value(), 4);
    }
}
