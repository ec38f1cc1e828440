use arrow::{
    array::{new_empty_array, Array, ArrayRef, AsArray, GenericListArray, OffsetSizeTrait},
    compute::concat,
    datatypes::{DataType, FieldRef},
};

use crate::NestedKind;

/// A column stored as a sequence of arrays sharing one data type.
#[derive(Debug, Clone)]
pub struct ChunkedArray {
    data_type: DataType,
    chunks: Vec<ArrayRef>,
    len: usize,
}

impl ChunkedArray {
    pub fn try_new(data_type: DataType, chunks: Vec<ArrayRef>) -> crate::Result<Self> {
        for chunk in &chunks {
            if chunk.data_type() != &data_type {
                return Err(crate::Error::chunk_type(&data_type, chunk.data_type()));
            }
        }
        let len = chunks.iter().map(|c| c.len()).sum();
        Ok(Self {
            data_type,
            chunks,
            len,
        })
    }

    pub fn new_empty(data_type: DataType) -> Self {
        Self {
            data_type,
            chunks: Vec::new(),
            len: 0,
        }
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn null_count(&self) -> usize {
        self.chunks.iter().map(|c| c.null_count()).sum()
    }

    pub fn chunks(&self) -> &[ArrayRef] {
        &self.chunks
    }

    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// Memory used by the arrays backing this column.
    pub fn nbytes(&self) -> usize {
        self.chunks.iter().map(|c| c.get_array_memory_size()).sum()
    }

    /// Combine all chunks into a single array.
    pub fn concat(&self) -> crate::Result<ArrayRef> {
        match self.chunks.as_slice() {
            [] => Ok(new_empty_array(&self.data_type)),
            [chunk] => Ok(chunk.clone()),
            chunks => {
                let refs = chunks.iter().map(|c| c.as_ref()).collect::<Vec<_>>();
                Ok(concat(&refs)?)
            }
        }
    }

    /// Split a struct column into one column per sub-field.
    ///
    /// The children are the struct's stored child arrays; the parent validity is not merged in.
    pub fn struct_children(&self) -> crate::Result<Vec<(FieldRef, ChunkedArray)>> {
        let fields = match &self.data_type {
            DataType::Struct(fields) => fields,
            dtype => return Err(crate::Error::DataType(dtype.clone())),
        };

        let mut children = Vec::with_capacity(fields.len());
        for (i, field) in fields.iter().enumerate() {
            let chunks = self
                .chunks
                .iter()
                .map(|chunk| chunk.as_struct().column(i).clone())
                .collect::<Vec<_>>();
            children.push((
                field.clone(),
                ChunkedArray::try_new(field.data_type().clone(), chunks)?,
            ));
        }
        Ok(children)
    }

    /// Concatenate the elements of every non-null list row, keeping the chunk layout.
    ///
    /// Null elements inside a list are kept.
    pub fn list_flatten(&self) -> crate::Result<ChunkedArray> {
        let item = match &self.data_type {
            DataType::List(item) | DataType::LargeList(item) | DataType::FixedSizeList(item, _) => {
                item
            }
            dtype => return Err(crate::Error::DataType(dtype.clone())),
        };

        let chunks = self
            .chunks
            .iter()
            .map(|chunk| flatten_list_chunk(chunk.as_ref()))
            .collect::<crate::Result<Vec<_>>>()?;
        ChunkedArray::try_new(item.data_type().clone(), chunks)
    }

    pub fn is_nested(&self) -> bool {
        NestedKind::is_nested(&self.data_type)
    }
}

impl From<ArrayRef> for ChunkedArray {
    fn from(array: ArrayRef) -> Self {
        Self {
            data_type: array.data_type().clone(),
            len: array.len(),
            chunks: vec![array],
        }
    }
}

/// Compares logical contents, ignoring how values are split into chunks.
impl PartialEq for ChunkedArray {
    fn eq(&self, other: &Self) -> bool {
        if self.data_type != other.data_type || self.len != other.len {
            return false;
        }
        match (self.concat(), other.concat()) {
            (Ok(lhs), Ok(rhs)) => lhs.to_data() == rhs.to_data(),
            _ => false,
        }
    }
}

fn flatten_list_chunk(array: &dyn Array) -> crate::Result<ArrayRef> {
    match array.data_type() {
        DataType::List(_) => flatten_offsets(array.as_list::<i32>()),
        DataType::LargeList(_) => flatten_offsets(array.as_list::<i64>()),
        DataType::FixedSizeList(_, _) => {
            let list = array.as_fixed_size_list();
            let size = list.value_length() as usize;
            let ranges = (0..list.len()).filter(|&i| list.is_valid(i)).map(|i| {
                let start = list.value_offset(i) as usize;
                (start, start + size)
            });
            concat_ranges(list.values(), ranges)
        }
        dtype => Err(crate::Error::DataType(dtype.clone())),
    }
}

fn flatten_offsets<O: OffsetSizeTrait>(list: &GenericListArray<O>) -> crate::Result<ArrayRef> {
    let offsets = list.value_offsets();
    let ranges = (0..list.len())
        .filter(|&i| list.is_valid(i))
        .map(|i| (offsets[i].as_usize(), offsets[i + 1].as_usize()));
    concat_ranges(list.values(), ranges)
}

/// Concatenate the `[start, end)` ranges of `values` into one array.
///
/// Adjacent ranges are merged so a list without null rows is returned as a single slice.
pub fn concat_ranges<I>(values: &ArrayRef, ranges: I) -> crate::Result<ArrayRef>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (start, end) in ranges {
        if start == end {
            continue;
        }
        match merged.last_mut() {
            Some((_, last_end)) if *last_end == start => *last_end = end,
            _ => merged.push((start, end)),
        }
    }

    match merged.as_slice() {
        [] => Ok(new_empty_array(values.data_type())),
        [(start, end)] => Ok(values.slice(*start, end - start)),
        ranges => {
            let parts = ranges
                .iter()
                .map(|(start, end)| values.slice(*start, end - start))
                .collect::<Vec<_>>();
            let refs = parts.iter().map(|a| a.as_ref()).collect::<Vec<_>>();
            Ok(concat(&refs)?)
        }
    }
}

/// Concatenate arrays of one type into a single array.
pub fn concat_arrays(data_type: &DataType, arrays: &[ArrayRef]) -> crate::Result<ArrayRef> {
    ChunkedArray::try_new(data_type.clone(), arrays.to_vec())?.concat()
}
