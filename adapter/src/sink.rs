/*!
    Downstream consumer contract.
*/

use streamdec_types::{DecodedFrame, OutputCaps, Result};

/**
    The element consuming decoded output.

    Negotiation is a capability exchange that happens exactly once per
    format change: the adapter offers the shape it will push and the
    consumer either accepts it or refuses. After a refusal the adapter
    retries with the next produced unit.
*/
pub trait Downstream {
    /**
        Offer the output shape. Returns true when the consumer accepts.
    */
    fn negotiate(&mut self, caps: &OutputCaps) -> bool;

    /**
        True while the consumer can take data. Units produced while the
        consumer is unusable are dropped, not queued.
    */
    fn usable(&self) -> bool {
        true
    }

    /**
        Take ownership of one decoded unit.
    */
    fn push(&mut self, frame: DecodedFrame) -> Result<()>;
}
