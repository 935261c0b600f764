use lox_core::memory::GrowableArray;
use lox_core::{Chunk, InterpretResult, OpCode, Value, ValueStore, VirtualMachine};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Nil),
        any::<bool>().prop_map(Value::Bool),
        (-1.0e9..1.0e9f64).prop_map(Value::Number),
    ]
}

proptest! {
    #[test]
    fn line_for_matches_every_written_byte(
        writes in prop::collection::vec((any::<u8>(), 1u32..50), 0..300)
    ) {
        let mut chunk = Chunk::new();
        for &(byte, line) in &writes {
            chunk.write_byte(byte, line);
        }
        prop_assert_eq!(chunk.len(), writes.len());
        prop_assert_eq!(chunk.lines().total_recorded(), writes.len());
        for (i, &(_, line)) in writes.iter().enumerate() {
            prop_assert_eq!(chunk.line_for(i), Some(line));
        }
        prop_assert_eq!(chunk.line_for(writes.len()), None);
    }

    #[test]
    fn count_tracks_appends_and_capacity_never_shrinks(n in 0usize..500) {
        let mut array = GrowableArray::new();
        let mut previous = array.capacity();
        for i in 0..n {
            array.push(i);
            prop_assert!(array.count() <= array.capacity());
            prop_assert!(array.capacity() >= previous);
            previous = array.capacity();
        }
        prop_assert_eq!(array.count(), n);
    }

    #[test]
    fn write_byte_tracks_count_and_capacity(bytes in prop::collection::vec(any::<u8>(), 0..500)) {
        let mut chunk = Chunk::new();
        let mut previous = chunk.code_capacity();
        for (i, &byte) in bytes.iter().enumerate() {
            chunk.write_byte(byte, (i / 7) as u32 + 1);
            prop_assert!(chunk.len() <= chunk.code_capacity());
            prop_assert!(chunk.code_capacity() >= previous);
            prop_assert!(chunk.lines().runs().len() <= chunk.lines().capacity());
            previous = chunk.code_capacity();
        }
        prop_assert_eq!(chunk.len(), bytes.len());
        prop_assert_eq!(chunk.code(), &bytes[..]);
    }

    #[test]
    fn append_tracks_count_and_capacity(values in prop::collection::vec(scalar(), 0..300)) {
        let mut store = ValueStore::new();
        let mut previous = store.capacity();
        for v in &values {
            store.append(*v);
            prop_assert!(store.count() <= store.capacity());
            prop_assert!(store.capacity() >= previous);
            previous = store.capacity();
        }
        prop_assert_eq!(store.count(), values.len());
    }

    #[test]
    fn added_constant_reads_back(values in prop::collection::vec(scalar(), 1..100)) {
        let mut store = ValueStore::new();
        for v in &values {
            let index = store.append(*v);
            prop_assert_eq!(store.get(index), Some(*v));
        }
        prop_assert_eq!(store.count(), values.len());
    }

    #[test]
    fn constant_leaves_value_on_top(value in scalar(), padding in 0usize..20) {
        let mut chunk = Chunk::new();
        for _ in 0..padding {
            chunk.add_constant(Value::Nil);
        }
        let index = chunk.add_constant(value);
        chunk.write_op(OpCode::Constant, 1);
        chunk.write_byte(index as u8, 1);
        chunk.write_op(OpCode::Return, 1);

        let mut vm = VirtualMachine::default();
        prop_assert_eq!(vm.interpret(&chunk), InterpretResult::Ok);
        prop_assert_eq!(vm.stack(), &[value][..]);
    }

    #[test]
    fn subtraction_is_a_minus_b(a in -1.0e6..1.0e6f64, b in -1.0e6..1.0e6f64) {
        let mut chunk = Chunk::new();
        chunk.write_constant(Value::Number(a), 1).expect("room");
        chunk.write_constant(Value::Number(b), 1).expect("room");
        chunk.write_op(OpCode::Subtract, 1);
        chunk.write_op(OpCode::Return, 1);

        let mut vm = VirtualMachine::default();
        prop_assert_eq!(vm.interpret(&chunk), InterpretResult::Ok);
        prop_assert_eq!(vm.peek_top(), Some(Value::Number(a - b)));
    }
}
