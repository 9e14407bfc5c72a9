//! Builds a small use-case diagram in code and prints it as SVG.
//!
//! ```text
//! cargo run -p vellum --example from_records > use_case.svg
//! ```

use vellum::{
    DiagramBuilder, VellumError,
    model::{ConnectorRecord, DiagramDocument, DiagramKind, ElementKind, NodeRecord, PointRecord},
};

fn main() -> Result<(), VellumError> {
    let document = DiagramDocument::new(DiagramKind::UseCase)
        .with_node(NodeRecord::new("customer", ElementKind::Actor, 20.0, 40.0).with_name("Customer"))
        .with_node(
            NodeRecord::new("order", ElementKind::UseCase, 200.0, 20.0).with_name("Place an order"),
        )
        .with_node(
            NodeRecord::new("pay", ElementKind::UseCase, 200.0, 140.0).with_name("Pay by card"),
        )
        .with_connector(ConnectorRecord::new("customer", "order"))
        .with_connector(
            ConnectorRecord::new("order", "pay")
                .with_name("<<include>>")
                .with_line("dashed")
                .with_caption(PointRecord::new(260.0, 100.0)),
        );

    let svg = DiagramBuilder::default().render_svg(&document)?;
    println!("{svg}");
    Ok(())
}
