use alloy_consensus::{
    transaction::Recovered, Eip658Value, Receipt, ReceiptEnvelope, ReceiptWithBloom, Signed,
    TxEip1559, TxEnvelope,
};
use alloy_primitives::{keccak256, Address, Bloom, Bytes, LogData, Signature, TxHash, B256, U256};
use alloy_rpc_types_eth::{Block, Header, Log, Transaction, TransactionReceipt};
use alloy_sol_types::SolEvent;
use zkevm_primitives::BlockInfo;

/// Returns a block without transactions.
pub fn block(info: BlockInfo, parent_hash: B256, timestamp: u64) -> Block {
    let header = Header {
        hash: info.hash,
        inner: alloy_consensus::Header {
            number: info.number,
            parent_hash,
            timestamp,
            ..Default::default()
        },
        total_difficulty: None,
        size: None,
    };
    Block { header, ..Default::default() }
}

/// Returns a log emitted by `address` in the provided block and transaction.
pub fn log<E: SolEvent>(address: Address, event: &E, block: BlockInfo, tx_hash: TxHash) -> Log {
    raw_log(address, event.encode_log_data(), block, tx_hash)
}

/// Returns a log with a signature unknown to the zkEVM contracts.
pub fn unknown_log(address: Address, block: BlockInfo, tx_hash: TxHash) -> Log {
    let data = LogData::new_unchecked(
        vec![keccak256("Transfer(address,address,uint256)"), B256::ZERO, B256::ZERO],
        Bytes::from(U256::from(1).to_be_bytes_vec()),
    );
    raw_log(address, data, block, tx_hash)
}

/// Returns a log carrying the provided data.
pub fn raw_log(address: Address, data: LogData, block: BlockInfo, tx_hash: TxHash) -> Log {
    Log {
        inner: alloy_primitives::Log { address, data },
        block_hash: Some(block.hash),
        block_number: Some(block.number),
        block_timestamp: None,
        transaction_hash: Some(tx_hash),
        transaction_index: Some(0),
        log_index: Some(0),
        removed: false,
    }
}

/// Returns a transaction sent by `from` with the provided input, mined in `block` or pending if
/// [`None`].
pub fn transaction(
    hash: TxHash,
    from: Address,
    input: Bytes,
    block: Option<BlockInfo>,
) -> Transaction {
    let tx = TxEip1559 { chain_id: 1, input, ..Default::default() };
    let signature = Signature::new(U256::from(1), U256::from(1), false);
    let envelope = TxEnvelope::Eip1559(Signed::new_unchecked(tx, signature, hash));

    Transaction {
        inner: Recovered::new_unchecked(envelope, from),
        block_hash: block.map(|b| b.hash),
        block_number: block.map(|b| b.number),
        transaction_index: block.map(|_| 0),
        effective_gas_price: None,
    }
}

/// Returns a successful receipt for the transaction mined in `block`.
pub fn receipt(hash: TxHash, from: Address, block: BlockInfo) -> TransactionReceipt {
    let receipt = Receipt::<Log> {
        status: Eip658Value::Eip658(true),
        cumulative_gas_used: 21_000,
        logs: vec![],
    };

    TransactionReceipt {
        inner: ReceiptEnvelope::Eip1559(ReceiptWithBloom {
            receipt,
            logs_bloom: Bloom::default(),
        }),
        transaction_hash: hash,
        transaction_index: Some(0),
        block_hash: Some(block.hash),
        block_number: Some(block.number),
        gas_used: 21_000,
        effective_gas_price: 1,
        blob_gas_used: None,
        blob_gas_price: None,
        from,
        to: None,
        contract_address: None,
    }
}
