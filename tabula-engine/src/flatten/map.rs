use arrow::{
    array::{Array, ArrayRef, AsArray},
    datatypes::DataType,
};
use tabula_common::{
    table::{concat_arrays, concat_ranges},
    ChunkedArray,
};

/// Split a map column into its keys and values.
///
/// Entries of all non-null rows are concatenated in row order, then in stored entry order.
/// Duplicate keys are kept. Both outputs are single, newly built arrays.
pub(super) fn map_entries(column: &ChunkedArray) -> crate::Result<(ArrayRef, ArrayRef)> {
    let (key_type, value_type) = entry_types(column.data_type())?;

    let mut keys = Vec::with_capacity(column.num_chunks());
    let mut values = Vec::with_capacity(column.num_chunks());
    for chunk in column.chunks() {
        let map = chunk.as_map();
        let offsets = map.value_offsets();
        let ranges = (0..map.len())
            .filter(|&i| map.is_valid(i))
            .map(|i| (offsets[i] as usize, offsets[i + 1] as usize))
            .collect::<Vec<_>>();
        keys.push(concat_ranges(map.keys(), ranges.iter().copied())?);
        values.push(concat_ranges(map.values(), ranges)?);
    }

    Ok((
        concat_arrays(&key_type, &keys)?,
        concat_arrays(&value_type, &values)?,
    ))
}

fn entry_types(dtype: &DataType) -> crate::Result<(DataType, DataType)> {
    if let DataType::Map(entries, _) = dtype {
        if let DataType::Struct(fields) = entries.data_type() {
            if let [key, value] = fields.as_ref() {
                return Ok((key.data_type().clone(), value.data_type().clone()));
            }
        }
    }
    Err(crate::Error::DataType(dtype.clone()))
}
